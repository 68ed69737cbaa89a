use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::server::{self, AppState};
use sweepr_common::config::ScanConfig;
use sweepr_core::{CidrRegistry, LivenessScanner};

pub async fn serve(bind: SocketAddr, registry: CidrRegistry, cfg: ScanConfig) -> anyhow::Result<()> {
    registry.ensure_exists()?;
    info!("Using registry {}", registry.path().display());

    let state = AppState::new(LivenessScanner::icmp(cfg), registry);
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("Listening on http://{bind}");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down, waiting for running scans to finish");
}
