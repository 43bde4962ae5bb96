//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod allocator;
pub mod catalog;
pub mod fleet;
pub mod logging;
pub mod server;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::allocator::AllocatorConfig;
pub use self::catalog::{CatalogConfig, CatalogRetryConfig};
pub use self::fleet::FleetConfig;
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;
pub use self::store::StoreConfig;

use crate::error::AppError;

/// Root broker configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Assignment store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Resource catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Fleet membership settings.
    #[serde(default)]
    pub fleet: FleetConfig,
    /// Allocation protocol settings.
    #[serde(default)]
    pub allocator: AllocatorConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BrokerConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the `base` file, an environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with `BROKER`
    /// (nested keys separated by `__`, e.g. `BROKER__STORE__PROVIDER`).
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BROKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.catalog.retry.max_attempts == 0 {
            return Err(AppError::configuration(
                "catalog.retry.max_attempts must be at least 1",
            ));
        }
        if self.catalog.provider == "s3" && self.catalog.bucket.is_empty() {
            return Err(AppError::configuration(
                "catalog.bucket is required for the s3 catalog",
            ));
        }
        if self.fleet.provider == "http" && self.fleet.http.base_url.is_empty() {
            return Err(AppError::configuration(
                "fleet.http.base_url is required for the http directory",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BrokerConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.catalog.retry.max_attempts, 10);
        assert_eq!(config.catalog.retry.delay_ms, 1000);
        assert_eq!(config.allocator.contention_delay_ms, 500);
        assert_eq!(config.catalog.suffix, ".lic");
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = BrokerConfig::default();
        config.catalog.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_s3_requires_bucket() {
        let mut config = BrokerConfig::default();
        config.catalog.provider = "s3".to_string();
        config.catalog.bucket.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let raw = r#"
            [store]
            provider = "redis"

            [fleet]
            default_fleet = "byol-asg"

            [fleet.static_fleets]
            byol-asg = ["i-1", "i-2"]
        "#;
        let config: BrokerConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("parse");

        assert_eq!(config.store.provider, "redis");
        assert_eq!(config.store.record_key, "assignments");
        assert_eq!(config.fleet.default_fleet, "byol-asg");
        assert_eq!(
            config.fleet.static_fleets.get("byol-asg"),
            Some(&vec!["i-1".to_string(), "i-2".to_string()])
        );
        assert_eq!(config.server.port, 8080);
    }
}
