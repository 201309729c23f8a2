//! roster-core: Shared types, configuration, and error handling for Roster.
//!
//! This crate provides the foundational types used across the Roster crates:
//! - The `Employee` node and the record shape returned by list queries
//! - List filtering and the sort allow-lists
//! - Settings loading
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use error::RosterError;
pub use types::{Employee, EmployeeRecord, ListFilter, SortField, SortOrder};
