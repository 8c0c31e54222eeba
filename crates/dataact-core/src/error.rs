//! # Error Types
//!
//! Errors raised by the foundational types. Higher crates wrap these in
//! their own `thiserror` enums.

use thiserror::Error;

/// Errors produced by `dataact-core` primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A contract category string did not name any known category.
    #[error("unknown contract category: {0:?}")]
    UnknownCategory(String),

    /// A timestamp string could not be parsed as RFC 3339.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
