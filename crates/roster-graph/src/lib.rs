//! Roster Graph — Neo4j client and employee store.
//!
//! Every read and write of `Employee` nodes flows through this crate.
//! Handlers talk to the [`EmployeeStore`] trait; [`GraphClient`] is the
//! Neo4j implementation and [`MemoryStore`] an in-process one.

pub mod client;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use memory::MemoryStore;
pub use store::EmployeeStore;
