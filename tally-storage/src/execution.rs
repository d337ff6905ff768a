//! SELECT execution proxy.
//!
//! Materializes a query's rows up front so callers can iterate by column
//! name or by position without holding statement lifetimes, and can read
//! the fetched-row count without issuing an extra COUNT query.

use rusqlite::Connection;
use tally_core::{ScalarValue, StorageError};

/// The materialized result of one SELECT.
#[derive(Debug, Clone)]
pub struct SqlExecution {
    columns: Vec<String>,
    rows: Vec<Vec<ScalarValue>>,
}

impl SqlExecution {
    /// Prepare and execute `sql` with `params`, fetching every row.
    pub fn run(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Self, StorageError> {
        let mut stmt = conn.prepare(sql).map_err(sqe)?;
        let columns: Vec<String> =
            stmt.column_names().iter().map(|c| c.to_string()).collect();
        let column_count = columns.len();

        let mut rows = Vec::new();
        let mut fetched = stmt.query(params).map_err(sqe)?;
        while let Some(row) = fetched.next().map_err(sqe)? {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                let value: rusqlite::types::Value = row.get(idx).map_err(sqe)?;
                values.push(to_scalar(value));
            }
            rows.push(values);
        }

        tracing::debug!(rows = rows.len(), columns = column_count, "executed query");
        Ok(Self { columns, rows })
    }

    /// Selected column names, in SELECT order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of fetched rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate rows as name→value views.
    pub fn rows(&self) -> impl Iterator<Item = NamedRow<'_>> {
        self.rows.iter().map(|values| NamedRow {
            columns: &self.columns,
            values,
        })
    }

    /// Iterate rows positionally.
    pub fn raw_rows(&self) -> impl Iterator<Item = &[ScalarValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// First column of the first row — for `SELECT COUNT(*)`-style
    /// queries. `None` when the result set is empty.
    pub fn scalar(&self) -> Option<&ScalarValue> {
        self.rows.first().and_then(|row| row.first())
    }
}

/// A borrowed row view resolving values by column name.
#[derive(Debug, Clone, Copy)]
pub struct NamedRow<'a> {
    columns: &'a [String],
    values: &'a [ScalarValue],
}

impl<'a> NamedRow<'a> {
    /// Value of the named column, `None` if the SELECT has no such column.
    pub fn get(&self, name: &str) -> Option<&'a ScalarValue> {
        let idx = self.columns.iter().position(|c| c == name)?;
        self.values.get(idx)
    }

    /// Iterate (column, value) pairs in SELECT order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a ScalarValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Positional access.
    pub fn values(&self) -> &'a [ScalarValue] {
        self.values
    }
}

pub(crate) fn to_scalar(value: rusqlite::types::Value) -> ScalarValue {
    match value {
        rusqlite::types::Value::Null => ScalarValue::Null,
        rusqlite::types::Value::Integer(n) => ScalarValue::Integer(n),
        rusqlite::types::Value::Real(r) => ScalarValue::Real(r),
        rusqlite::types::Value::Text(s) => ScalarValue::Text(s),
        rusqlite::types::Value::Blob(b) => ScalarValue::Blob(b),
    }
}

/// StorageError from rusqlite.
pub(crate) fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
