//! GROUP BY materialization.
//!
//! Folds the rows of a grouped aggregate query into a hierarchical
//! [`GroupedResult`]: the last selected column is the subtotal, every
//! preceding column is one grouping dimension, and each dimension becomes
//! one nesting level.
//!
//! A NULL group key marks a ROLLUP-style total row. With a `total_key`
//! name supplied, that row is stored under the name and the name is
//! registered as the level's total key, so `total()` reads the
//! database-computed value instead of summing it in twice. Without one,
//! NULL keys render under the `(none)` label like any other group.

use std::collections::HashMap;

use rusqlite::Connection;
use tally_core::{GroupedResult, GroupedValue, ScalarValue, StorageError};

use crate::execution::SqlExecution;

/// Intermediate fold tree; converted bottom-up once all rows are in.
enum Node {
    Leaf(ScalarValue),
    Branch(HashMap<String, Node>),
}

/// Run a GROUP BY query and materialize it as a [`GroupedResult`].
///
/// The query must select at least two columns. Non-integer subtotals
/// fail fast with `InvalidEntryType` when the result is constructed.
pub fn grouped_result(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
    total_key: Option<&str>,
) -> Result<GroupedResult, StorageError> {
    let exec = SqlExecution::run(conn, sql, params)?;
    let column_count = exec.columns().len();
    if column_count < 2 {
        return Err(StorageError::NotSupported {
            operation: "grouped_result".to_string(),
            reason: format!(
                "query must select grouping column(s) plus a subtotal, got {column_count} column(s)"
            ),
        });
    }

    let mut root = HashMap::new();
    for row in exec.raw_rows() {
        let (keys, value) = row.split_at(column_count - 1);
        insert_row(&mut root, keys, &value[0], total_key);
    }

    Ok(into_result(root, total_key)?)
}

/// Insert one query row along its group-key path.
///
/// A NULL key with a `total_key` name cuts the path short: the subtotal
/// is the rollup total for the level reached so far and lands there
/// under the name.
fn insert_row(
    map: &mut HashMap<String, Node>,
    keys: &[ScalarValue],
    value: &ScalarValue,
    total_key: Option<&str>,
) {
    let (key, rest) = match keys.split_first() {
        Some(split) => split,
        None => return,
    };

    let rollup = matches!(key, ScalarValue::Null) && total_key.is_some();
    let label = match (rollup, total_key) {
        (true, Some(name)) => name.to_string(),
        _ => key.to_string(),
    };

    if rest.is_empty() || rollup {
        map.insert(label, Node::Leaf(value.clone()));
        return;
    }

    match map.entry(label).or_insert_with(|| Node::Branch(HashMap::new())) {
        Node::Branch(next) => insert_row(next, rest, value, total_key),
        node => {
            // An earlier, shorter-keyed row left a leaf here; the deeper
            // path wins.
            let mut next = HashMap::new();
            insert_row(&mut next, rest, value, total_key);
            *node = Node::Branch(next);
        }
    }
}

/// Convert the fold tree bottom-up. Each level only carries the total
/// key if a rollup row actually landed there.
fn into_result(
    map: HashMap<String, Node>,
    total_key: Option<&str>,
) -> Result<GroupedResult, tally_core::AggregateError> {
    let mut has_total_row = false;
    let mut entries = Vec::with_capacity(map.len());
    for (key, node) in map {
        if Some(key.as_str()) == total_key {
            has_total_row = true;
        }
        let value = match node {
            Node::Leaf(v) => GroupedValue::from(v),
            Node::Branch(children) => GroupedValue::from(into_result(children, total_key)?),
        };
        entries.push((key, value));
    }

    let level_total_key = if has_total_row { total_key } else { None };
    GroupedResult::from_entries(entries, level_total_key)
}
