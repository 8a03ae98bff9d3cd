//! Schooldir - School directory service
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod images;
pub mod schools;
pub mod server;
