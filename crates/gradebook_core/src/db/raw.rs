//! Diagnostics escape hatches for arbitrary SQL.
//!
//! # Responsibility
//! - Run ad-hoc statements against a gradebook database for debugging.
//! - Tear the schema down completely for scratch environments.
//!
//! # Invariants
//! - Nothing in the core repositories depends on this module; regular
//!   operations go through the typed repository APIs.

use super::DbResult;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Executes one arbitrary SQL statement with positional parameters.
///
/// With `want_rows` set, the statement is queried and every row is captured
/// as a vector of dynamically typed column values. Without it, the statement
/// is executed for effect only and `None` is returned.
pub fn raw_query(
    conn: &Connection,
    sql: &str,
    params: &[Value],
    want_rows: bool,
) -> DbResult<Option<Vec<Vec<Value>>>> {
    let mut stmt = conn.prepare(sql)?;

    if !want_rows {
        stmt.execute(params_from_iter(params.iter().cloned()))?;
        return Ok(None);
    }

    let column_count = stmt.column_count();
    let mut rows = stmt.query(params_from_iter(params.iter().cloned()))?;
    let mut captured = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for index in 0..column_count {
            values.push(row.get::<_, Value>(index)?);
        }
        captured.push(values);
    }

    Ok(Some(captured))
}

/// Drops every gradebook table and resets the schema version.
///
/// The next `open_db`/`open_db_in_memory` bootstrap on the same database
/// recreates the schema from scratch.
pub fn drop_all_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS grades;
         DROP TABLE IF EXISTS user_progress;
         DROP TABLE IF EXISTS users;
         DROP TABLE IF EXISTS exercises;
         PRAGMA user_version = 0;",
    )?;
    Ok(())
}
