//! Allocation results.

use serde::Serialize;

use broker_core::error::AppError;
use broker_core::types::id::ResourceId;

/// A resource granted to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grant {
    /// The resource now held by the client.
    pub resource: ResourceId,
    /// `true` when the pairing already existed before this call.
    pub reused: bool,
}

/// Why no resource could be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// The catalog listed no candidates at all.
    PoolEmpty,
    /// Every candidate was already held by another client.
    NoneAvailable,
}

/// Terminal state of one `assign_or_retrieve` call.
#[derive(Debug)]
pub enum AllocationOutcome {
    /// A resource is paired with the client.
    Assigned(Grant),
    /// The pool has nothing left for this client.
    Exhausted(ExhaustionReason),
    /// A dependency failed; the client may retry later.
    Failed(AppError),
}

impl AllocationOutcome {
    /// Short label used in logs and API bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Assigned(_) => "assigned",
            Self::Exhausted(_) => "exhausted",
            Self::Failed(_) => "failed",
        }
    }
}
