//! Health check handler.

use axum::Json;
use axum::extract::State;

use broker_core::traits::AssignmentStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/v1/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.allocator.store();
    let reachable = match store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(store = %store.store_type(), error = %e, "Store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: if reachable { "connected" } else { "unavailable" }.to_string(),
    })
}
