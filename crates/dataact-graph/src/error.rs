//! Graph store error types.
//!
//! Parse and query failures carry the engine's own message, prefixed
//! with the file or query they came from.

use std::path::PathBuf;

use oxigraph::store::StorageError;
use thiserror::Error;

/// Errors raised while loading graphs or evaluating queries.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A graph source file does not exist.
    #[error("{}", path.display())]
    FileNotFound { path: PathBuf },

    /// A graph source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Graph data is malformed for the format chosen from its extension.
    #[error("failed to parse {} as {format}: {message}", path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    /// Query text is malformed or its evaluation failed.
    #[error("{0}")]
    Query(String),

    /// The query form does not match the call, e.g. `ASK` sent to `select`.
    #[error("expected a {expected} query")]
    UnexpectedQueryForm { expected: &'static str },

    /// The underlying store failed.
    #[error("graph storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
