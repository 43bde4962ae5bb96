//! Core traits implemented by the backend crates.
//!
//! These are defined here so that the allocator and API layers can depend
//! on abstractions rather than concrete implementations.

pub mod assignment_store;
pub mod fleet;
pub mod lister;

pub use assignment_store::{AssignmentStore, Reservation};
pub use fleet::FleetDirectory;
pub use lister::ObjectLister;
