//! Application builder: wires store, catalog, directory and allocator into
//! handler state and runs the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use broker_allocator::LicenseAllocator;
use broker_core::config::BrokerConfig;
use broker_core::error::{AppError, ErrorKind};
use broker_core::result::AppResult;
use broker_fleet::MembershipAuthorizer;

use crate::router::build_router;
use crate::state::AppState;

/// Build every component named by the configuration.
pub async fn build_state(config: BrokerConfig) -> AppResult<AppState> {
    info!(provider = %config.store.provider, "Initializing assignment store");
    let store = broker_store::build_store(&config.store).await?;

    info!(provider = %config.catalog.provider, "Initializing license catalog");
    let catalog = Arc::new(broker_catalog::build_catalog(&config.catalog).await?);
    let pool = config.catalog.pool_location();
    info!(pool = %pool, scheme = %catalog.scheme(), "License pool configured");

    info!(provider = %config.fleet.provider, "Initializing fleet directory");
    let directory = broker_fleet::build_directory(&config.fleet)?;

    let allocator = LicenseAllocator::new(store, catalog, pool, config.allocator.clone());
    let authorizer = MembershipAuthorizer::new(directory);

    Ok(AppState::new(config, allocator, authorizer))
}

/// Runs the broker HTTP server until Ctrl+C or SIGTERM.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish.
pub async fn run_server(config: BrokerConfig) -> AppResult<()> {
    info!("Starting license broker v{}", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    info!(addr = %addr, "License broker listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.changed().await;
    });
    let mut server_task = tokio::spawn(async move { server.await });

    tokio::select! {
        finished = &mut server_task => return flatten(finished),
        _ = shutdown_signal() => {}
    }

    info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining requests");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(grace, server_task).await {
        Ok(finished) => flatten(finished),
        Err(_) => {
            warn!("Grace period elapsed with requests still in flight");
            Ok(())
        }
    }
}

fn flatten(
    finished: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> AppResult<()> {
    match finished {
        Ok(Ok(())) => {
            info!("Server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(AppError::with_source(ErrorKind::Internal, "Server error", e)),
        Err(e) => Err(AppError::with_source(ErrorKind::Internal, "Server task panicked", e)),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
