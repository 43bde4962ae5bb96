//! Shared domain types.

pub mod id;
pub mod pool;
pub mod record;

pub use id::{ClientId, ResourceId};
pub use pool::PoolLocation;
pub use record::{Assignment, AssignmentRecord, PAIRING_SEPARATOR};
