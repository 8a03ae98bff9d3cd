//! Record service for school registrations.
//!
//! Coordinates validation, the image store and the database so that a
//! create either persists nothing (invalid input) or writes the image before
//! inserting the row that references it.

mod service;

pub use service::SchoolService;
