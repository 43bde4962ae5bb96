//! License broker server: hands each autoscaling fleet member its own
//! license file from a shared pool.
//!
//! Main entry point that loads configuration, sets up logging and starts the
//! HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use broker_core::config::{BrokerConfig, LoggingConfig};
use broker_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = broker_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<BrokerConfig, AppError> {
    let base = std::env::var("BROKER_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("BROKER_ENV").unwrap_or_else(|_| "development".to_string());
    BrokerConfig::load_from(&base, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
