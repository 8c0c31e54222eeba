//! Rule registry error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a registry or resolving rule queries.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A registry file does not exist.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A registry or query file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A registry file is not valid YAML for the registry schema.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A registry names a category that does not exist.
    #[error("unknown contract category {name:?}")]
    UnknownCategory { name: String },

    /// The registry content is structurally valid but violates a rule
    /// (duplicate ids, empty fields, rules under `UNKNOWN`).
    #[error("invalid rule registry: {0}")]
    Validation(String),

    /// A query reference did not resolve. The location is what was
    /// looked for (a file path for directory sources).
    #[error("{location}")]
    QueryNotFound { location: String },
}

/// Result type alias for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;
