//! Job Board API Server Entry Point
//!
//! Bootstraps configuration and telemetry, optionally ingests a seed file,
//! and starts the Axum HTTP server.

use std::path::Path;
use std::sync::Arc;

use jobboard_api::telemetry::{init_tracing, TelemetryConfig};
use jobboard_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use jobboard_core::{Job, SiteConfig};
use jobboard_storage::{CacheConfig, InMemoryJobStore};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing(&TelemetryConfig::default())?;

    let api_config = ApiConfig::from_env()?;
    let spa_shell = api_config.load_spa_shell().await?;

    let state = AppState::new(
        Arc::new(InMemoryJobStore::new()),
        CacheConfig::from_env(),
        SiteConfig::from_env(),
        spa_shell,
    )?;

    if let Some(path) = &api_config.seed_file {
        let jobs = load_seed(path).await?;
        let written = state.store.bulk_ingest(jobs).await?;
        tracing::info!(path = %path.display(), written, "Seed file ingested");
    }

    let app = create_api_router(state, &api_config);

    let addr = api_config.socket_addr()?;
    tracing::info!(%addr, "Starting job board API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn load_seed(path: &Path) -> ApiResult<Vec<Job>> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        ApiError::internal_error(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&raw)?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
