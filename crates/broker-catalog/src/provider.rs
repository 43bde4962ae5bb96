//! Catalog selection from configuration.

use std::sync::Arc;

use tracing::info;

use broker_core::config::CatalogConfig;
use broker_core::error::AppError;
use broker_core::result::AppResult;
use broker_core::traits::lister::ObjectLister;

use crate::reader::CatalogReader;

/// Build the catalog reader for the lister named by `config.provider`.
pub async fn build_catalog(config: &CatalogConfig) -> AppResult<CatalogReader> {
    let lister: Arc<dyn ObjectLister> = match config.provider.as_str() {
        #[cfg(feature = "local")]
        "local" => {
            info!(root = %config.local.root_path, "Using local license catalog");
            Arc::new(crate::providers::LocalLister::new(&config.local.root_path))
        }
        #[cfg(feature = "s3")]
        "s3" => {
            info!(bucket = %config.bucket, "Using S3 license catalog");
            Arc::new(crate::providers::S3Lister::new(&config.s3).await)
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown catalog provider '{other}'"
            )));
        }
    };

    Ok(CatalogReader::from_config(lister, config))
}
