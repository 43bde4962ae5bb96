//! In-memory assignment store using a Tokio mutex for single-node deployments.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use broker_core::result::AppResult;
use broker_core::traits::assignment_store::{AssignmentStore, Reservation};
use broker_core::types::id::{ClientId, ResourceId};
use broker_core::types::record::{Assignment, AssignmentRecord, reservation_members};

/// In-memory assignment store holding the record in its wire encoding.
///
/// The set is guarded by a Tokio mutex, so a reservation's membership check
/// and its three inserts happen under one lock acquisition. Suitable for
/// single-node deployments and as the test double for the shared record.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssignmentStore {
    /// Raw record members.
    members: Arc<Mutex<BTreeSet<String>>>,
    /// Number of `try_reserve` calls observed.
    reserve_calls: Arc<AtomicUsize>,
}

impl MemoryAssignmentStore {
    /// Creates an empty store (equivalent to a record that does not exist).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with raw record members.
    ///
    /// No validation happens here: seeding a corrupt record is allowed so
    /// readers can be exercised against it.
    pub fn with_members<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: Arc::new(Mutex::new(members.into_iter().map(Into::into).collect())),
            reserve_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Snapshot of the raw record members.
    pub async fn raw_members(&self) -> BTreeSet<String> {
        self.members.lock().await.clone()
    }

    /// Number of reservation attempts made against this store.
    pub fn reservation_attempts(&self) -> usize {
        self.reserve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssignmentStore for MemoryAssignmentStore {
    fn store_type(&self) -> &str {
        "memory"
    }

    async fn try_reserve(
        &self,
        client: &ClientId,
        resource: &ResourceId,
    ) -> AppResult<Reservation> {
        self.reserve_calls.fetch_add(1, Ordering::SeqCst);
        let mut members = self.members.lock().await;

        if members.contains(client.as_str()) || members.contains(resource.as_str()) {
            debug!(client = %client, resource = %resource, "Reservation refused, already taken");
            return Ok(Reservation::Taken);
        }

        members.extend(reservation_members(client, resource));
        info!(
            client = %client,
            resource = %resource,
            assignments = members.len() / 3,
            "Resource reserved"
        );
        Ok(Reservation::Reserved)
    }

    async fn lookup(&self, client: &ClientId) -> AppResult<Option<ResourceId>> {
        let members = self.members.lock().await;
        let record = AssignmentRecord::decode(members.iter())?;
        Ok(record.resource_for(client).cloned())
    }

    async fn assignments(&self) -> AppResult<Vec<Assignment>> {
        let members = self.members.lock().await;
        Ok(AssignmentRecord::decode(members.iter())?.assignments())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
