//! List the license pool.

use std::collections::HashMap;

use serde::Serialize;
use tabled::Tabled;

use broker_core::config::BrokerConfig;
use broker_core::error::AppError;
use broker_core::traits::AssignmentStore;

use crate::output::{self, OutputFormat};

/// One candidate license file.
#[derive(Debug, Serialize, Tabled)]
pub struct PoolRow {
    /// License file name.
    #[tabled(rename = "File")]
    pub resource: String,
    /// Client holding it, if any.
    #[tabled(rename = "Holder")]
    pub holder: String,
    /// Locator handed to clients.
    #[tabled(rename = "Location")]
    pub location: String,
}

/// Execute the pool command
pub async fn execute(config: BrokerConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = broker_api::build_state(config).await?;
    let allocator = &state.allocator;

    let candidates = allocator.candidates().await?;
    let holders: HashMap<_, _> = allocator
        .store()
        .assignments()
        .await?
        .into_iter()
        .map(|a| (a.resource, a.client))
        .collect();

    let rows: Vec<PoolRow> = candidates
        .iter()
        .map(|resource| PoolRow {
            resource: resource.file_name().to_string(),
            holder: holders
                .get(resource)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            location: allocator.locator(resource),
        })
        .collect();

    if format == OutputFormat::Table {
        let free = rows.iter().filter(|r| r.holder.is_empty()).count();
        println!("Pool {}: {} files, {} free", allocator.pool(), rows.len(), free);
    }
    output::emit(&rows, format)
}
