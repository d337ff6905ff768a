//! Storage-layer errors for SQLite operations.

use super::aggregate_error::AggregateError;
use super::error_code::{self, ErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Operation not supported: {operation} — {reason}")]
    NotSupported { operation: String, reason: String },

    /// Materializing query rows into a grouped result failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::NotSupported { .. } => error_code::NOT_SUPPORTED,
            Self::Aggregate(e) => e.error_code(),
        }
    }
}
