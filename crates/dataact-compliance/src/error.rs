//! Compliance engine error types.
//!
//! Only checker construction and directory discovery fail outward.
//! Contract-load and rule-level failures are recorded inside the reports
//! instead (see [`crate::report`]).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that prevent a check run from starting.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// A resource the checker cannot work without is missing.
    #[error("{kind} not found: {}", path.display())]
    MissingResource { kind: &'static str, path: PathBuf },

    /// A contracts directory passed to discovery does not exist.
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The rule registry could not be built.
    #[error("rule registry error: {0}")]
    Rules(#[from] dataact_rules::RuleError),

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration at {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// I/O error during discovery.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result alias for checker operations.
pub type ComplianceResult<T> = Result<T, ComplianceError>;

/// Errors from the presentation layer: document conversion and export.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing an exported report failed.
    #[error("failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document contradicts itself (e.g. `compliant: true` with
    /// violations) and cannot be turned back into a report.
    #[error("inconsistent report document: {0}")]
    Inconsistent(String),
}

/// Result alias for presentation operations.
pub type ReportResult<T> = Result<T, ReportError>;
