//! Route definitions for the broker HTTP API.
//!
//! All routes are mounted under `/api/v1`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(license_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// License allocation endpoints
fn license_routes() -> Router<AppState> {
    Router::new()
        .route("/licenses/allocate", post(handlers::allocation::allocate))
        .route("/licenses/release", post(handlers::allocation::release))
}

/// Health probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
