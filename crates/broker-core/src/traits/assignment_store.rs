//! Assignment store trait: the single shared conditional-write record.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::id::{ClientId, ResourceId};
use crate::types::record::Assignment;

/// Outcome of an atomic reservation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reservation {
    /// The client, resource and pairing token were written.
    Reserved,
    /// The client or the resource was already present; nothing was written.
    Taken,
}

/// Trait for the shared assignment record.
///
/// Implementations must make [`try_reserve`](AssignmentStore::try_reserve)
/// atomic with respect to every other caller of the same record: either
/// all three members are added or none are. Entries are never removed.
/// A record that does not exist yet behaves exactly like an empty one.
#[async_trait]
pub trait AssignmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g. "memory", "redis").
    fn store_type(&self) -> &str;

    /// Atomically pair `client` with `resource` if neither is present yet.
    ///
    /// Contention is reported as [`Reservation::Taken`], not as an error.
    /// Any other failure is a `StoreUnavailable` error.
    async fn try_reserve(&self, client: &ClientId, resource: &ResourceId)
    -> AppResult<Reservation>;

    /// Look up the resource currently paired with `client`.
    ///
    /// Fails with `CorruptRecord` if the record violates its invariants.
    async fn lookup(&self, client: &ClientId) -> AppResult<Option<ResourceId>>;

    /// Return every assignment in the record, ordered by client id.
    async fn assignments(&self) -> AppResult<Vec<Assignment>>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
