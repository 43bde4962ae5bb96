//! Assignment store configuration.

use serde::{Deserialize, Serialize};

/// Assignment store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"memory"` (single node) or `"redis"` (shared).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis backend settings.
    #[serde(default)]
    pub redis: RedisStoreConfig,
    /// Well-known key of the shared record, appended to the key prefix.
    #[serde(default = "default_record_key")]
    pub record_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisStoreConfig::default(),
            record_key: default_record_key(),
        }
    }
}

/// Redis store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for every broker key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_record_key() -> String {
    "assignments".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "license-broker:".to_string()
}
