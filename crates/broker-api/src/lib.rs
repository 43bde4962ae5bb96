//! # broker-api
//!
//! HTTP API layer for the license broker built on Axum.
//!
//! Exposes the allocation and release endpoints plus a health probe, and
//! maps allocation outcomes onto the status codes fleet clients expect.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use router::build_router;
pub use state::AppState;
