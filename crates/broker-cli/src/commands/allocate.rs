//! Allocate a license from the command line.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use broker_allocator::AllocationOutcome;
use broker_core::config::BrokerConfig;
use broker_core::error::AppError;
use broker_core::types::id::ClientId;

use crate::output::{self, OutputFormat};

/// Arguments for the allocate command
#[derive(Debug, Args)]
pub struct AllocateArgs {
    /// Client (instance) id
    #[arg(long)]
    pub client: String,

    /// Fleet to check membership against; defaults to `fleet.default_fleet`
    #[arg(long)]
    pub fleet: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct AllocationRow {
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Reused")]
    reused: bool,
    #[tabled(rename = "Location")]
    location: String,
}

/// Execute the allocate command
pub async fn execute(
    args: &AllocateArgs,
    config: BrokerConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = ClientId::parse(args.client.as_str())?;
    let fleet = args
        .fleet
        .clone()
        .unwrap_or_else(|| config.fleet.default_fleet.clone());
    let state = broker_api::build_state(config).await?;

    if fleet.is_empty() {
        output::note("No fleet given, skipping membership check");
    } else if !state.authorizer.is_authorized(&client, &fleet).await? {
        return Err(AppError::unauthorized(format!(
            "'{client}' is not a member of fleet '{fleet}'"
        )));
    }

    let outcome = state.allocator.assign_or_retrieve(&client).await;
    let row = match &outcome {
        AllocationOutcome::Assigned(grant) => AllocationRow {
            client: client.to_string(),
            outcome: outcome.label().to_string(),
            reused: grant.reused,
            location: state.allocator.locator(&grant.resource),
        },
        AllocationOutcome::Exhausted(reason) => AllocationRow {
            client: client.to_string(),
            outcome: format!("{} ({reason:?})", outcome.label()),
            reused: false,
            location: String::new(),
        },
        AllocationOutcome::Failed(e) => return Err(e.clone()),
    };

    output::emit_one(&row, format)
}
