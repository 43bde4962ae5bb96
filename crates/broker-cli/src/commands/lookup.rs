//! Show the license held by one client.

use clap::Args;

use broker_core::config::BrokerConfig;
use broker_core::error::AppError;
use broker_core::traits::AssignmentStore;
use broker_core::types::id::ClientId;

use crate::commands::assignments::AssignmentRow;
use crate::output::{self, OutputFormat};

/// Arguments for the lookup command
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Client (instance) id
    #[arg(long)]
    pub client: String,
}

/// Execute the lookup command
pub async fn execute(
    args: &LookupArgs,
    config: BrokerConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = ClientId::parse(args.client.as_str())?;
    let state = broker_api::build_state(config).await?;
    let allocator = &state.allocator;

    match allocator.store().lookup(&client).await? {
        Some(resource) => output::emit_one(
            &AssignmentRow {
                location: allocator.locator(&resource),
                client: client.into_inner(),
                resource: resource.into_inner(),
            },
            format,
        ),
        None => {
            output::note(&format!("No license assigned to '{client}'"));
            Ok(())
        }
    }
}
