//! Schooldir-DB: Schema bootstrap, connection pooling, and queries.
//!
//! This crate provides database functionality for schooldir using SQLite
//! with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `functions` - Custom SQL functions installed on each connection
//! - `pool` - Connection pool management
//! - `schema` - Idempotent creation of the `schools` table
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```no_run
//! use schooldir_common::SchoolFilter;
//! use schooldir_db::pool::{get_conn, init_pool};
//! use schooldir_db::{queries::schools, schema};
//! use std::path::Path;
//!
//! let pool = init_pool(Path::new("data/school_db.sqlite"), 4).unwrap();
//! let conn = get_conn(&pool).unwrap();
//! schema::bootstrap(&conn).unwrap();
//!
//! for school in schools::list_schools(&conn, &SchoolFilter::default()).unwrap() {
//!     println!("{} ({})", school.name, school.city);
//! }
//! ```

pub mod functions;
pub mod pool;
pub mod queries;
pub mod schema;
