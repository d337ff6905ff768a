//! # tally-storage
//!
//! SQLite query layer for the tally reporting utilities.
//! Borrows a caller-owned `rusqlite::Connection` — this crate opens no
//! connections and holds no state of its own.
//!
//! Two entry points:
//! - [`SqlExecution`] runs a SELECT and exposes its rows by column name
//!   or by position, plus the fetched-row count and a scalar shortcut.
//! - [`grouped_result`] runs a GROUP BY query and folds its rows into a
//!   hierarchical [`tally_core::GroupedResult`], one nesting level per
//!   grouping column.

pub mod execution;
pub mod grouping;

pub use execution::{NamedRow, SqlExecution};
pub use grouping::grouped_result;
