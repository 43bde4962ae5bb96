//! Catalog reader: suffix filtering and listing retries on top of a lister.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use broker_core::config::catalog::{CatalogConfig, CatalogRetryConfig};
use broker_core::error::{AppError, ErrorKind};
use broker_core::result::AppResult;
use broker_core::traits::lister::ObjectLister;
use broker_core::types::id::ResourceId;
use broker_core::types::pool::PoolLocation;
use broker_core::types::record::PAIRING_SEPARATOR;

/// Reads the list of candidate resources from an object namespace.
#[derive(Debug, Clone)]
pub struct CatalogReader {
    /// Raw listing backend.
    lister: Arc<dyn ObjectLister>,
    /// Key suffix marking license objects.
    suffix: String,
    /// Listing retry policy.
    retry: CatalogRetryConfig,
}

impl CatalogReader {
    /// Create a reader over `lister` with an explicit suffix and retry policy.
    pub fn new(lister: Arc<dyn ObjectLister>, suffix: &str, retry: CatalogRetryConfig) -> Self {
        Self {
            lister,
            suffix: suffix.to_string(),
            retry,
        }
    }

    /// Create a reader from catalog configuration.
    pub fn from_config(lister: Arc<dyn ObjectLister>, config: &CatalogConfig) -> Self {
        Self::new(lister, &config.suffix, config.retry.clone())
    }

    /// Locator scheme of the underlying backend.
    pub fn scheme(&self) -> &str {
        self.lister.scheme()
    }

    /// List candidate resources under `pool`, in backend order.
    ///
    /// Failed listings are retried up to `max_attempts` times with a fixed
    /// delay between attempts; once attempts run out the last error is
    /// wrapped in `CatalogUnavailable`. An empty pool is `Ok(vec![])`.
    pub async fn list_candidates(&self, pool: &PoolLocation) -> AppResult<Vec<ResourceId>> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                info!(attempt, max = max_attempts, pool = %pool, "Retrying catalog listing");
                tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
            }

            match self.lister.list_keys(pool).await {
                Ok(keys) => {
                    let candidates = self.filter(keys);
                    debug!(pool = %pool, count = candidates.len(), "Catalog candidates listed");
                    return Ok(candidates);
                }
                Err(e) => {
                    warn!(attempt, error = %e, pool = %pool, "Catalog listing failed");
                    last_error = Some(e);
                }
            }
        }

        error!(pool = %pool, attempts = max_attempts, "Catalog unavailable, giving up");
        let message = format!("Failed to list catalog {pool} after {max_attempts} attempts");
        Err(match last_error {
            Some(cause) => AppError::with_source(ErrorKind::CatalogUnavailable, message, cause),
            None => AppError::catalog_unavailable(message),
        })
    }

    /// Keep license keys only, dropping directory placeholders and duplicates.
    ///
    /// Keys containing the pairing separator cannot be told apart from
    /// pairing tokens once written to the record, so they are never offered.
    fn filter(&self, keys: Vec<String>) -> Vec<ResourceId> {
        let mut seen = HashSet::new();
        keys.into_iter()
            .filter(|key| !key.ends_with('/') && key.ends_with(&self.suffix))
            .filter(|key| {
                if key.contains(PAIRING_SEPARATOR) {
                    warn!(key = %key, "Skipping license key containing the pairing separator");
                    return false;
                }
                true
            })
            .filter(|key| seen.insert(key.clone()))
            .map(ResourceId::new)
            .collect()
    }
}
