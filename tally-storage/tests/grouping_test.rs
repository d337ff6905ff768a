//! grouped_result integration tests against in-memory SQLite.

use rusqlite::Connection;
use tally_core::{AggregateError, StorageError};
use tally_storage::grouped_result;

fn seeded_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE issues (
             id       INTEGER PRIMARY KEY,
             project  TEXT NOT NULL,
             status   TEXT NOT NULL,
             priority TEXT NOT NULL
         );
         INSERT INTO issues (project, status, priority) VALUES
             ('alpha', 'open',   'P1'),
             ('alpha', 'open',   'P2'),
             ('alpha', 'closed', 'P1'),
             ('beta',  'open',   'P1'),
             ('beta',  'closed', 'P2'),
             ('beta',  'closed', 'P2');",
    )
    .unwrap();
    conn
}

#[test]
fn one_dimension_group_by() {
    let conn = seeded_conn();
    let result = grouped_result(
        &conn,
        "SELECT status, COUNT(*) FROM issues GROUP BY status",
        [],
        None,
    )
    .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.get("open").unwrap().as_integer(), Some(3));
    assert_eq!(result.get("closed").unwrap().as_integer(), Some(3));
    assert_eq!(result.total().unwrap(), 6);
    assert!((result.probe("open_percent") - 50.0).abs() < 1e-9);
}

#[test]
fn two_dimensions_nest_one_level_per_column() {
    let conn = seeded_conn();
    let result = grouped_result(
        &conn,
        "SELECT project, status, COUNT(*) FROM issues GROUP BY project, status",
        [],
        None,
    )
    .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.total().unwrap(), 6);
    assert_eq!(result.leaf_values_count(false, false), 4);

    let alpha = result.get("alpha").unwrap().as_nested().unwrap();
    assert_eq!(alpha.get("open").unwrap().as_integer(), Some(2));
    assert_eq!(alpha.get("closed").unwrap().as_integer(), Some(1));
    assert_eq!(alpha.total().unwrap(), 3);
}

#[test]
fn null_key_becomes_the_rollup_total() {
    let conn = seeded_conn();
    // SQLite has no WITH ROLLUP; a UNION ALL total row produces the same
    // shape: a NULL group key carrying the precomputed grand total.
    let result = grouped_result(
        &conn,
        "SELECT status, COUNT(*) FROM issues GROUP BY status
         UNION ALL
         SELECT NULL, COUNT(*) + 90 FROM issues",
        [],
        Some("ALL"),
    )
    .unwrap();

    assert_eq!(result.total_key(), Some("ALL"));
    assert_eq!(result.get("ALL").unwrap().as_integer(), Some(96));
    // The database-computed total wins over summation.
    assert_eq!(result.total().unwrap(), 96);
    assert_eq!(result.get("open").unwrap().as_integer(), Some(3));
}

#[test]
fn null_key_without_total_key_gets_a_placeholder_label() {
    let conn = seeded_conn();
    let result = grouped_result(
        &conn,
        "SELECT NULL, COUNT(*) FROM issues",
        [],
        None,
    )
    .unwrap();

    assert_eq!(result.get("(none)").unwrap().as_integer(), Some(6));
}

#[test]
fn single_column_query_is_rejected() {
    let conn = seeded_conn();
    let err = grouped_result(&conn, "SELECT COUNT(*) FROM issues", [], None).unwrap_err();
    assert!(matches!(err, StorageError::NotSupported { .. }));
}

#[test]
fn text_subtotal_fails_fast() {
    let conn = seeded_conn();
    let err = grouped_result(
        &conn,
        "SELECT status, 'oops' FROM issues GROUP BY status",
        [],
        None,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        StorageError::Aggregate(AggregateError::InvalidEntryType { .. })
    ));
}

#[test]
fn empty_group_by_yields_an_empty_result() {
    let conn = seeded_conn();
    let result = grouped_result(
        &conn,
        "SELECT status, COUNT(*) FROM issues WHERE 1 = 0 GROUP BY status",
        [],
        None,
    )
    .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.total().unwrap(), 0);
}
