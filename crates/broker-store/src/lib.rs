//! # broker-store
//!
//! Backends for the shared assignment record. Supports two modes:
//!
//! - **memory**: in-process set guarded by a Tokio mutex (single node, tests)
//! - **redis**: one Redis SET mutated through a Lua script for atomicity
//!
//! The backend is selected at runtime based on configuration.

pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use memory::MemoryAssignmentStore;
pub use provider::build_store;
