//! SQL functions registered on every pooled connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Name of the Unicode-aware lowercase function, `fold_case(text)`.
pub const FOLD_CASE: &str = "fold_case";

/// Register the custom scalar functions on `conn`.
///
/// SQLite's built-in `lower()` and `LIKE` only fold ASCII letters, so name
/// search goes through `fold_case` instead. `NULL` stays `NULL`.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_CASE,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}
