//! Redis-backed assignment store.

pub mod client;
pub mod store;

pub use client::RecordConnection;
pub use store::RedisAssignmentStore;
