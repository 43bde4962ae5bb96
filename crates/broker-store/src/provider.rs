//! Store selection from configuration.

use std::sync::Arc;

use tracing::info;

use broker_core::config::StoreConfig;
use broker_core::error::AppError;
use broker_core::result::AppResult;
use broker_core::traits::assignment_store::AssignmentStore;

use crate::memory::MemoryAssignmentStore;

/// Build the assignment store named by `config.provider`.
pub async fn build_store(config: &StoreConfig) -> AppResult<Arc<dyn AssignmentStore>> {
    match config.provider.as_str() {
        "memory" => {
            info!("Using in-memory assignment store (single node only)");
            Ok(Arc::new(MemoryAssignmentStore::new()))
        }
        #[cfg(feature = "redis-backend")]
        "redis" => {
            let connection = crate::redis::RecordConnection::open(config).await?;
            Ok(Arc::new(crate::redis::RedisAssignmentStore::new(connection)))
        }
        other => Err(AppError::configuration(format!(
            "Unknown assignment store provider '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_memory_store() {
        let config = StoreConfig::default();
        let store = build_store(&config).await.unwrap();
        assert_eq!(store.store_type(), "memory");
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let config = StoreConfig {
            provider: "dynamo".to_string(),
            ..Default::default()
        };
        let err = build_store(&config).await.unwrap_err();
        assert_eq!(err.kind, broker_core::error::ErrorKind::Configuration);
    }
}
