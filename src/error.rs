//! Error types for the qlearn crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the qlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("action '{action}' is not part of the table's action set")]
    UnknownAction { action: String },

    #[error("update of ({state}, {action}) would store non-finite value {value}")]
    NonFiniteValue {
        state: String,
        action: String,
        value: f64,
    },

    #[error("snapshot action set {found:?} does not match configured actions {expected:?}")]
    ActionSetMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("snapshot not found at {path:?}")]
    SnapshotNotFound { path: PathBuf },

    #[error("corrupt snapshot at {path:?}: {message}")]
    CorruptSnapshot { path: PathBuf, message: String },

    #[error("failed to {operation}: {source}")]
    WriteFailure {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Shorthand used by validation code.
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
