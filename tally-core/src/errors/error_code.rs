//! Stable error codes for log/telemetry correlation.

pub const KEY_NOT_FOUND: &str = "KEY_NOT_FOUND";
pub const INVALID_ENTRY_TYPE: &str = "INVALID_ENTRY_TYPE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const NOT_SUPPORTED: &str = "NOT_SUPPORTED";

/// Maps an error to its stable string code.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
