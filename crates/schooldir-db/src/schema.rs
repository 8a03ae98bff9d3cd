//! Idempotent creation of the `schools` table.
//!
//! Bootstrap is an explicit administrative action. It is safe to run any
//! number of times; existing rows are never touched.

use rusqlite::Connection;
use schooldir_common::{Error, Result};

/// Name of the table holding school records.
pub const SCHOOLS_TABLE: &str = "schools";

const CREATE_SCHOOLS: &str = "
    CREATE TABLE IF NOT EXISTS schools (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        contact TEXT NOT NULL,
        image TEXT NOT NULL,
        email_id TEXT NOT NULL
    )
";

/// Create the `schools` table if it does not exist yet.
///
/// `AUTOINCREMENT` keeps ids strictly increasing and never reused, which the
/// newest-first listing relies on.
pub fn bootstrap(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_SCHOOLS)
        .map_err(|e| Error::database(format!("Failed to create schools table: {}", e)))?;

    tracing::info!("Schools table is ready");
    Ok(())
}

/// Check whether a table exists.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table],
            |row| row.get(0),
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(count > 0)
}

/// Column names of a table, in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?) ORDER BY cid")
        .map_err(|e| Error::database(e.to_string()))?;

    let columns = stmt
        .query_map([table], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(columns)
}
