//! Database query modules.
//!
//! - schools: School insert and filtered listing

pub mod schools;
