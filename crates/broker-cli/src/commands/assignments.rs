//! Dump the shared assignment record.

use serde::Serialize;
use tabled::Tabled;

use broker_core::config::BrokerConfig;
use broker_core::error::AppError;
use broker_core::traits::AssignmentStore;

use crate::output::{self, OutputFormat};

/// One client → resource pairing.
#[derive(Debug, Serialize, Tabled)]
pub struct AssignmentRow {
    #[tabled(rename = "Client")]
    pub client: String,
    #[tabled(rename = "Resource")]
    pub resource: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

/// Execute the assignments command
pub async fn execute(config: BrokerConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = broker_api::build_state(config).await?;
    let allocator = &state.allocator;

    let rows: Vec<AssignmentRow> = allocator
        .store()
        .assignments()
        .await?
        .into_iter()
        .map(|a| AssignmentRow {
            location: allocator.locator(&a.resource),
            client: a.client.into_inner(),
            resource: a.resource.into_inner(),
        })
        .collect();

    output::emit(&rows, format)
}
