//! Schooldir-Common: Shared types, validation, and utilities.
//!
//! This crate provides common functionality used across schooldir:
//!
//! - **Core Types**: The school record, its insert form, and list filters
//! - **Catalog**: The known cities and states offered by the registration form
//! - **Validation**: Field-level checks applied before anything is persisted
//! - **Path Utilities**: Image extension detection and upload name sanitizing
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use schooldir_common::validation::{is_valid_contact, is_valid_email};
//! use schooldir_common::{Error, Result};
//!
//! assert!(is_valid_contact("1234567890"));
//! assert!(is_valid_email("a@b.com"));
//!
//! fn example() -> Result<()> {
//!     Err(Error::database("connection refused"))
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod paths;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use types::*;
