//! License allocation for the broker.
//!
//! [`LicenseAllocator`] hands each client exactly one resource from the pool,
//! returning the same resource on every later call for that client.

pub mod allocator;
pub mod outcome;

pub use allocator::LicenseAllocator;
pub use outcome::{AllocationOutcome, ExhaustionReason, Grant};
