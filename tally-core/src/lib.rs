//! # tally-core
//!
//! Foundation crate for the tally reporting utilities.
//! Defines the database value model, the error taxonomy, and the
//! hierarchical grouped-aggregate result structure that report code
//! reads totals, percentages, and leaf counts from.
//!
//! This crate does no I/O — `tally-storage` populates these structures
//! from SQL GROUP BY queries.

pub mod errors;
pub mod grouped;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use errors::error_code::ErrorCode;
pub use errors::{AggregateError, StorageError};
pub use grouped::GroupedResult;
pub use value::{GroupedValue, ScalarValue};
