//! Start the broker server.

use clap::Args;

use broker_core::config::BrokerConfig;
use broker_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: BrokerConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting license broker...");
    println!("  Host:  {}", config.server.host);
    println!("  Port:  {}", config.server.port);
    println!("  Store: {}", config.store.provider);

    broker_api::run_server(config).await
}
