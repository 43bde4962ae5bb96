//! Resource catalog configuration.

use serde::{Deserialize, Serialize};

use crate::types::pool::PoolLocation;

/// Resource catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog provider: `"s3"` or `"local"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Bucket holding license objects. For the local provider this is only
    /// used in returned locators.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Deployment prefix inside the bucket.
    #[serde(default)]
    pub prefix: String,
    /// Sub-directory under the prefix that holds the license files.
    #[serde(default = "default_license_dir")]
    pub license_dir: String,
    /// Key suffix marking an object as a license file.
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Local catalog settings.
    #[serde(default)]
    pub local: LocalCatalogConfig,
    /// S3 catalog settings.
    #[serde(default)]
    pub s3: S3CatalogConfig,
    /// Listing retry policy.
    #[serde(default)]
    pub retry: CatalogRetryConfig,
}

impl CatalogConfig {
    /// The pool location described by this configuration.
    pub fn pool_location(&self) -> PoolLocation {
        PoolLocation::new(&self.bucket, &self.prefix, &self.license_dir)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            bucket: default_bucket(),
            prefix: String::new(),
            license_dir: default_license_dir(),
            suffix: default_suffix(),
            local: LocalCatalogConfig::default(),
            s3: S3CatalogConfig::default(),
            retry: CatalogRetryConfig::default(),
        }
    }
}

/// Local filesystem catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalCatalogConfig {
    /// Directory that plays the role of the bucket root.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalCatalogConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// S3-compatible catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3CatalogConfig {
    /// Custom endpoint URL (for non-AWS services like MinIO); empty for AWS.
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Use path-style addressing (needed by most S3-compatible services).
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for S3CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            force_path_style: false,
        }
    }
}

/// Retry policy for listing the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRetryConfig {
    /// Total listing attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for CatalogRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_bucket() -> String {
    "licenses".to_string()
}

fn default_license_dir() -> String {
    "license".to_string()
}

fn default_suffix() -> String {
    ".lic".to_string()
}

fn default_local_root() -> String {
    "./data/licenses".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_max_attempts() -> u32 {
    10
}

fn default_delay_ms() -> u64 {
    1000
}
