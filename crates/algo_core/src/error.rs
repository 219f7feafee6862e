//! Error types for the decision core.
//!
//! Only failures that stop planning are errors. A rejected placement or an
//! empty query result is routine and is reported through outcome values
//! instead (see [`crate::strategy::PlacementOutcome`]).

use thiserror::Error;

/// Result type alias using [`AlgoError`].
pub type Result<T> = std::result::Result<T, AlgoError>;

/// Top-level error type for the decision core.
#[derive(Debug, Error)]
pub enum AlgoError {
    /// A required field is missing from the match configuration.
    #[error("Match config is missing required field '{field}' for unit index {index}")]
    Config {
        /// Index into `unitInformation`.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The match configuration does not describe every unit type.
    #[error("Match config lists {found} unit types, expected at least {expected}")]
    IncompleteCatalog {
        /// Number of unit entries found.
        found: usize,
        /// Number of unit entries required.
        expected: usize,
    },

    /// The match configuration is not valid JSON.
    #[error("Failed to parse match config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A strategy policy file could not be read.
    #[error("Failed to read strategy policy: {0}")]
    PolicyRead(#[from] std::io::Error),

    /// A strategy policy file is not valid RON.
    #[error("Failed to parse strategy policy: {0}")]
    PolicyParse(#[from] ron::error::SpannedError),

    /// A strategy policy holds an out-of-range value.
    #[error("Invalid strategy policy: {0}")]
    InvalidPolicy(String),

    /// The engine reported a unit shorthand the catalog does not know.
    #[error("Unknown unit shorthand: {0}")]
    UnknownUnit(String),

    /// Planning reached a state it cannot continue from.
    #[error("Invalid planning state: {0}")]
    InvalidState(String),
}
