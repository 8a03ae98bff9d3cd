//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2. Opening a
//! pool creates the database file when it is absent but does not create any
//! tables; that is the job of [`crate::schema::bootstrap`].

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use schooldir_common::{Error, Result};

use crate::functions::register_functions;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the parent directory of the database file if needed
/// - Create the SQLite database file if it doesn't exist
/// - Set up connection pooling with r2d2
/// - Wait up to five seconds on a locked database instead of failing at once
/// - Install the custom SQL functions on every connection
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file
/// * `max_size` - Maximum number of pooled connections
///
/// # Example
///
/// ```no_run
/// use schooldir_db::pool::init_pool;
/// use std::path::Path;
///
/// let pool = init_pool(Path::new("data/school_db.sqlite"), 4).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &Path, max_size: u32) -> Result<DbPool> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::database(format!(
                "Failed to create database directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        register_functions(conn)
    });

    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    tracing::debug!(path = %db_path.display(), max_size, "Opened database pool");

    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// Every SQLite in-memory connection is its own database, so the pool holds a
/// single connection to keep all callers looking at the same data. The
/// database is lost when the pool is dropped.
///
/// # Example
///
/// ```
/// use schooldir_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| register_functions(conn));

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {}", e)))
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type. The connection returns to the pool
/// when dropped.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}
