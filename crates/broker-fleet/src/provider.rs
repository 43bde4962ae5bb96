//! Directory selection from configuration.

use std::sync::Arc;

use tracing::info;

use broker_core::config::FleetConfig;
use broker_core::error::AppError;
use broker_core::result::AppResult;
use broker_core::traits::fleet::FleetDirectory;

use crate::directories::StaticDirectory;

/// Build the fleet directory named by `config.provider`.
pub fn build_directory(config: &FleetConfig) -> AppResult<Arc<dyn FleetDirectory>> {
    match config.provider.as_str() {
        "static" => {
            info!(fleets = config.static_fleets.len(), "Using static fleet directory");
            Ok(Arc::new(StaticDirectory::new(&config.static_fleets)))
        }
        #[cfg(feature = "http")]
        "http" => {
            info!(base_url = %config.http.base_url, "Using HTTP fleet directory");
            Ok(Arc::new(crate::directories::HttpDirectory::new(&config.http)?))
        }
        other => Err(AppError::configuration(format!(
            "Unknown fleet directory provider '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_static_directory() {
        let directory = build_directory(&FleetConfig::default()).unwrap();
        assert_eq!(directory.directory_type(), "static");
    }

    #[test]
    fn test_unknown_provider() {
        let config = FleetConfig {
            provider: "autoscaling".to_string(),
            ..Default::default()
        };
        let err = build_directory(&config).unwrap_err();
        assert_eq!(err.kind, broker_core::error::ErrorKind::Configuration);
    }
}
