//! Fleet membership configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fleet membership configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Directory provider: `"static"` or `"http"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Fleet used when a request does not name one.
    #[serde(default)]
    pub default_fleet: String,
    /// Fleet name → member client ids, for the static provider.
    #[serde(default)]
    pub static_fleets: HashMap<String, Vec<String>>,
    /// HTTP directory settings.
    #[serde(default)]
    pub http: HttpDirectoryConfig,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_fleet: String::new(),
            static_fleets: HashMap::new(),
            http: HttpDirectoryConfig::default(),
        }
    }
}

/// HTTP fleet directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpDirectoryConfig {
    /// Base URL of the membership service.
    #[serde(default)]
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_provider() -> String {
    "static".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
