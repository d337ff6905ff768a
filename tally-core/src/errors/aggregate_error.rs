//! Errors from the grouped-aggregate structure.

use super::error_code::{self, ErrorCode};

/// Errors that can occur when reading or building a grouped result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// Strict lookup (`get`, `remove`, total-key resolution) on an absent
    /// key. Recoverable — callers can probe with `contains_key`/`get_opt`
    /// before using the strict variants.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// A total computation met an entry that is neither an integer
    /// subtotal nor a nested result. This is a construction-time contract
    /// violation by the caller; it is surfaced immediately rather than
    /// silently skipped.
    #[error("entry {key} has non-summable type {kind}")]
    InvalidEntryType { key: String, kind: &'static str },
}

impl ErrorCode for AggregateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::KeyNotFound { .. } => error_code::KEY_NOT_FOUND,
            Self::InvalidEntryType { .. } => error_code::INVALID_ENTRY_TYPE,
        }
    }
}
