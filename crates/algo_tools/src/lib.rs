//! # Algo Development Tools
//!
//! Command-line tools for development:
//! - Match configuration and policy validators
//! - Region library inspection
//! - Preset export

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod inspect;
pub mod validate;
