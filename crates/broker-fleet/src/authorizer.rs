//! Membership authorizer.

use std::sync::Arc;

use tracing::{debug, info};

use broker_core::result::AppResult;
use broker_core::traits::fleet::FleetDirectory;
use broker_core::types::id::ClientId;

/// Decides whether a client currently belongs to a fleet.
#[derive(Debug, Clone)]
pub struct MembershipAuthorizer {
    directory: Arc<dyn FleetDirectory>,
}

impl MembershipAuthorizer {
    /// Create an authorizer over a fleet directory.
    pub fn new(directory: Arc<dyn FleetDirectory>) -> Self {
        Self { directory }
    }

    /// Return the backing directory type.
    pub fn directory_type(&self) -> &str {
        self.directory.directory_type()
    }

    /// Check whether `client` is a current member of `fleet`.
    ///
    /// Membership is fetched on every call. Directory faults are returned as
    /// `AuthorityUnavailable` and are not retried here.
    pub async fn is_authorized(&self, client: &ClientId, fleet: &str) -> AppResult<bool> {
        let members = self.directory.members(fleet).await?;
        let authorized = members.iter().any(|member| member == client);

        if authorized {
            debug!(client = %client, fleet = %fleet, "Client is a fleet member");
        } else {
            info!(client = %client, fleet = %fleet, members = members.len(), "Client is not a fleet member");
        }
        Ok(authorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use broker_core::error::{AppError, ErrorKind};

    use crate::directories::StaticDirectory;

    #[derive(Debug)]
    struct DownDirectory;

    #[async_trait]
    impl FleetDirectory for DownDirectory {
        fn directory_type(&self) -> &str {
            "down"
        }

        async fn members(&self, _fleet: &str) -> AppResult<Vec<ClientId>> {
            Err(AppError::authority_unavailable("connection refused"))
        }
    }

    fn authorizer() -> MembershipAuthorizer {
        let fleets = HashMap::from([(
            "byol-asg".to_string(),
            vec!["i-1".to_string(), "i-2".to_string()],
        )]);
        MembershipAuthorizer::new(Arc::new(StaticDirectory::new(&fleets)))
    }

    #[tokio::test]
    async fn test_member_is_authorized() {
        let client = ClientId::parse("i-2").unwrap();
        assert!(authorizer().is_authorized(&client, "byol-asg").await.unwrap());
    }

    #[tokio::test]
    async fn test_non_member_is_rejected() {
        let client = ClientId::parse("i-9").unwrap();
        assert!(!authorizer().is_authorized(&client, "byol-asg").await.unwrap());
        let member = ClientId::parse("i-1").unwrap();
        assert!(!authorizer().is_authorized(&member, "other-asg").await.unwrap());
    }

    #[tokio::test]
    async fn test_directory_fault_propagates() {
        let authorizer = MembershipAuthorizer::new(Arc::new(DownDirectory));
        let client = ClientId::parse("i-1").unwrap();
        let err = authorizer.is_authorized(&client, "byol-asg").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthorityUnavailable);
    }
}
