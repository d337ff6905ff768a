//! Error taxonomy for the tally crates.
//!
//! Every error maps to a stable string code via [`error_code::ErrorCode`]
//! so logs and telemetry can correlate failures across layers.

pub mod aggregate_error;
pub mod error_code;
pub mod storage_error;

pub use aggregate_error::AggregateError;
pub use storage_error::StorageError;
