//! CLI command definitions and dispatch.

pub mod allocate;
pub mod assignments;
pub mod lookup;
pub mod pool;
pub mod serve;

use clap::{Parser, Subcommand};

use broker_core::config::BrokerConfig;
use broker_core::error::AppError;

use crate::output::OutputFormat;

/// License broker: hands out license files to autoscaling fleet members
#[derive(Debug, Parser)]
#[command(name = "broker-cli", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}`
    #[arg(short, long, env = "BROKER_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the broker HTTP server
    Serve(serve::ServeArgs),
    /// List candidate license files and who holds them
    Pool,
    /// Dump every assignment in the shared record
    Assignments,
    /// Show the license held by one client
    Lookup(lookup::LookupArgs),
    /// Allocate a license to a client, as the HTTP endpoint would
    Allocate(allocate::AllocateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Pool => pool::execute(config, self.format).await,
            Commands::Assignments => assignments::execute(config, self.format).await,
            Commands::Lookup(args) => lookup::execute(args, config, self.format).await,
            Commands::Allocate(args) => allocate::execute(args, config, self.format).await,
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(base: &str, env: &str) -> Result<BrokerConfig, AppError> {
    BrokerConfig::load_from(base, env)
}
