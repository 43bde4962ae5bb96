//! Application state shared across all handlers.

use std::sync::Arc;

use broker_allocator::LicenseAllocator;
use broker_core::config::BrokerConfig;
use broker_fleet::MembershipAuthorizer;

/// Shared application state passed to every handler via Axum's `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<BrokerConfig>,
    /// Allocation state machine.
    pub allocator: Arc<LicenseAllocator>,
    /// Fleet membership check.
    pub authorizer: Arc<MembershipAuthorizer>,
}

impl AppState {
    /// Bundle the wired components into handler state.
    pub fn new(
        config: BrokerConfig,
        allocator: LicenseAllocator,
        authorizer: MembershipAuthorizer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            allocator: Arc::new(allocator),
            authorizer: Arc::new(authorizer),
        }
    }
}
