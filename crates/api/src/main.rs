//! DueDash - assignments dashboard backed by Google Calendar
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context as _;
use duedash_lib::utils::logging::init_tracing;
use duedash_lib::{router, AppContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    // Logging first so config problems are visible
    init_tracing();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "no .env file loaded"),
    }

    let config = duedash_infra::config::load().context("failed to load configuration")?;
    let bind_address = config.server.bind_address.clone();

    let ctx = Arc::new(AppContext::new(config).context("failed to initialise application")?);
    let app = router(ctx);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(address = %bind_address, "DueDash listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("DueDash stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
