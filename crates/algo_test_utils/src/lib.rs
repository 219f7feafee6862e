//! # Algo Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Match configuration fixtures
//! - In-memory engine adapter
//! - Determinism harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;
pub mod mock_engine;

pub use mock_engine::MockEngine;

/// Re-export proptest for convenience.
pub use proptest;
