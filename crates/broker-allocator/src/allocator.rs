//! The allocation state machine.
//!
//! One call walks `CheckingExisting → Allocating → (Assigned | Exhausted |
//! Failed)`. The shared record is the only coordination point between
//! concurrent callers; candidates are tried strictly in catalog order and a
//! lost race simply moves on to the next candidate.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use broker_catalog::CatalogReader;
use broker_core::config::AllocatorConfig;
use broker_core::error::AppError;
use broker_core::traits::assignment_store::{AssignmentStore, Reservation};
use broker_core::types::id::{ClientId, ResourceId};
use broker_core::types::pool::PoolLocation;

use crate::outcome::{AllocationOutcome, ExhaustionReason, Grant};

/// Hands out pool resources to clients, one each.
#[derive(Debug, Clone)]
pub struct LicenseAllocator {
    /// Shared assignment record.
    store: Arc<dyn AssignmentStore>,
    /// Candidate listing.
    catalog: Arc<CatalogReader>,
    /// Pool the candidates come from.
    pool: PoolLocation,
    /// Contention delay and deadline.
    config: AllocatorConfig,
}

impl LicenseAllocator {
    /// Creates a new allocator.
    pub fn new(
        store: Arc<dyn AssignmentStore>,
        catalog: Arc<CatalogReader>,
        pool: PoolLocation,
        config: AllocatorConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            pool,
            config,
        }
    }

    /// The assignment store backing this allocator.
    pub fn store(&self) -> &Arc<dyn AssignmentStore> {
        &self.store
    }

    /// The pool candidates are drawn from.
    pub fn pool(&self) -> &PoolLocation {
        &self.pool
    }

    /// Locator handed to clients for a granted resource.
    pub fn locator(&self, resource: &ResourceId) -> String {
        self.pool.locator(self.catalog.scheme(), resource)
    }

    /// Current candidate resources in the pool.
    pub async fn candidates(&self) -> broker_core::result::AppResult<Vec<ResourceId>> {
        self.catalog.list_candidates(&self.pool).await
    }

    /// Return the client's existing resource, or reserve a free one.
    ///
    /// Never returns an error value: dependency failures and an elapsed
    /// deadline come back as [`AllocationOutcome::Failed`]. A reservation
    /// made before the deadline elapsed is kept and will be found by the
    /// client's next call.
    pub async fn assign_or_retrieve(&self, client: &ClientId) -> AllocationOutcome {
        let started = Instant::now();

        let outcome = match self.config.request_timeout_ms {
            0 => self.run(client).await,
            ms => match tokio::time::timeout(Duration::from_millis(ms), self.run(client)).await {
                Ok(outcome) => outcome,
                Err(_) => AllocationOutcome::Failed(AppError::timeout(format!(
                    "Allocation for '{client}' did not finish within {ms} ms"
                ))),
            },
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            AllocationOutcome::Assigned(grant) => info!(
                client = %client,
                resource = %grant.resource,
                reused = grant.reused,
                elapsed_ms,
                "License assigned"
            ),
            AllocationOutcome::Exhausted(reason) => warn!(
                client = %client,
                reason = ?reason,
                pool = %self.pool,
                elapsed_ms,
                "License pool exhausted"
            ),
            AllocationOutcome::Failed(e) => error!(
                client = %client,
                error = %e,
                elapsed_ms,
                "License allocation failed"
            ),
        }

        outcome
    }

    /// Teardown hook for a client leaving the fleet.
    ///
    /// Entries in the shared record are never removed, so this only records
    /// the event.
    pub async fn release(&self, client: &ClientId) -> broker_core::result::AppResult<()> {
        info!(client = %client, "Release requested, assignments are permanent");
        Ok(())
    }

    async fn run(&self, client: &ClientId) -> AllocationOutcome {
        debug!(client = %client, "Checking for an existing assignment");
        match self.store.lookup(client).await {
            Ok(Some(resource)) => {
                return AllocationOutcome::Assigned(Grant {
                    resource,
                    reused: true,
                });
            }
            Ok(None) => {}
            Err(e) => return AllocationOutcome::Failed(e),
        }

        let candidates = match self.catalog.list_candidates(&self.pool).await {
            Ok(candidates) => candidates,
            Err(e) => return AllocationOutcome::Failed(e),
        };
        if candidates.is_empty() {
            return AllocationOutcome::Exhausted(ExhaustionReason::PoolEmpty);
        }

        debug!(client = %client, candidates = candidates.len(), "Allocating from pool");
        let delay = Duration::from_millis(self.config.contention_delay_ms);

        for (index, candidate) in candidates.iter().enumerate() {
            match self.store.try_reserve(client, candidate).await {
                Ok(Reservation::Reserved) => {
                    return AllocationOutcome::Assigned(Grant {
                        resource: candidate.clone(),
                        reused: false,
                    });
                }
                Ok(Reservation::Taken) => {
                    debug!(client = %client, resource = %candidate, "Candidate taken");
                    // A refusal also happens when a concurrent call for the
                    // same client has already been paired.
                    match self.store.lookup(client).await {
                        Ok(Some(resource)) => {
                            return AllocationOutcome::Assigned(Grant {
                                resource,
                                reused: true,
                            });
                        }
                        Ok(None) => {}
                        Err(e) => return AllocationOutcome::Failed(e),
                    }
                    if index + 1 < candidates.len() && !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return AllocationOutcome::Failed(e),
            }
        }

        AllocationOutcome::Exhausted(ExhaustionReason::NoneAvailable)
    }
}
