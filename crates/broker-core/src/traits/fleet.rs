//! Fleet membership directory trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::ClientId;

/// A source of truth for which clients belong to a named fleet.
#[async_trait]
pub trait FleetDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Return the directory type name (e.g. "static", "http").
    fn directory_type(&self) -> &str;

    /// Return the current members of `fleet`. An unknown fleet has no members.
    ///
    /// Fails with `AuthorityUnavailable` if the directory cannot be queried.
    async fn members(&self, fleet: &str) -> AppResult<Vec<ClientId>>;
}
