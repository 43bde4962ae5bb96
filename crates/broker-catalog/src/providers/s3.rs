//! S3-compatible object lister.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::{debug, info};

use broker_core::config::catalog::S3CatalogConfig;
use broker_core::error::{AppError, ErrorKind};
use broker_core::result::AppResult;
use broker_core::traits::lister::ObjectLister;
use broker_core::types::pool::PoolLocation;

/// Lists license objects with `ListObjectsV2`, following continuation tokens.
#[derive(Debug, Clone)]
pub struct S3Lister {
    client: Client,
}

impl S3Lister {
    /// Create a lister from the S3 catalog configuration.
    ///
    /// Credentials come from the default AWS provider chain (environment,
    /// profile, instance role).
    pub async fn new(config: &S3CatalogConfig) -> Self {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            "Initializing S3 catalog lister"
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(&config.endpoint);
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        Self {
            client: Client::from_conf(s3_config),
        }
    }
}

#[async_trait]
impl ObjectLister for S3Lister {
    fn scheme(&self) -> &str {
        "s3"
    }

    async fn list_keys(&self, pool: &PoolLocation) -> AppResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&pool.bucket)
            .prefix(&pool.prefix)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                AppError::with_source(
                    ErrorKind::CatalogUnavailable,
                    format!(
                        "Failed to list s3://{}/{}: {}",
                        pool.bucket,
                        pool.prefix,
                        DisplayErrorContext(&e)
                    ),
                    e,
                )
            })?;

            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );
        }

        debug!(bucket = %pool.bucket, prefix = %pool.prefix, count = keys.len(), "Listed S3 catalog");
        Ok(keys)
    }
}
