//! Directory backed by fleet lists from configuration.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use broker_core::result::AppResult;
use broker_core::traits::fleet::FleetDirectory;
use broker_core::types::id::ClientId;

/// Fleet directory with a fixed membership, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    fleets: HashMap<String, Vec<ClientId>>,
}

impl StaticDirectory {
    /// Build a directory from fleet name → raw member ids.
    ///
    /// Members that are not valid client ids are skipped with a warning.
    pub fn new(fleets: &HashMap<String, Vec<String>>) -> Self {
        let fleets = fleets
            .iter()
            .map(|(name, raw_members)| {
                let members = raw_members
                    .iter()
                    .filter_map(|raw| match ClientId::parse(raw.as_str()) {
                        Ok(id) => Some(id),
                        Err(e) => {
                            warn!(fleet = %name, member = %raw, error = %e, "Skipping invalid fleet member");
                            None
                        }
                    })
                    .collect();
                (name.clone(), members)
            })
            .collect();

        Self { fleets }
    }
}

#[async_trait]
impl FleetDirectory for StaticDirectory {
    fn directory_type(&self) -> &str {
        "static"
    }

    async fn members(&self, fleet: &str) -> AppResult<Vec<ClientId>> {
        let members = self.fleets.get(fleet).cloned().unwrap_or_default();
        debug!(fleet = %fleet, count = members.len(), "Static fleet members");
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleets() -> HashMap<String, Vec<String>> {
        HashMap::from([(
            "byol-asg".to_string(),
            vec!["i-1".to_string(), " i-2 ".to_string(), "".to_string()],
        )])
    }

    #[tokio::test]
    async fn test_members_of_known_fleet() {
        let directory = StaticDirectory::new(&fleets());
        let members = directory.members("byol-asg").await.unwrap();
        assert_eq!(
            members,
            vec![ClientId::parse("i-1").unwrap(), ClientId::parse("i-2").unwrap()]
        );
    }

    #[tokio::test]
    async fn test_unknown_fleet_is_empty() {
        let directory = StaticDirectory::new(&fleets());
        assert!(directory.members("other").await.unwrap().is_empty());
    }
}
