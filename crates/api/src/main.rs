//! `shop-api` — HTTP entry point for the flower shop core.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise tracing.
//! 3. Seed the [`KeyStore`] from the key file or inline key.
//! 4. Spawn the key reload task when a key file is configured.
//! 5. Build the Axum router and serve until Ctrl-C.

mod config;
mod keys;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use keys::KeyStore;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Tracing is not up yet.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.listen_port,
        "shop-api starting"
    );

    // -----------------------------------------------------------------------
    // 3. Payment key
    // -----------------------------------------------------------------------
    let key_store = KeyStore::new();
    let key_source = keys::initial_load(&cfg, &key_store)?;

    // -----------------------------------------------------------------------
    // 4. Background tasks
    // -----------------------------------------------------------------------
    let _key_reload = key_source.map(|source| {
        keys::reload_task(source, cfg.key_reload_interval_secs, key_store.clone())
    });

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let reset_code_ttl = chrono::Duration::from_std(std::time::Duration::from_secs(
        cfg.reset_code_ttl_secs,
    ))
    .context("RESET_CODE_TTL_SECS out of range")?;
    let reset_token_ttl = chrono::Duration::from_std(std::time::Duration::from_secs(
        cfg.reset_token_ttl_secs,
    ))
    .context("RESET_TOKEN_TTL_SECS out of range")?;

    let state = AppState::new(key_store, reset_code_ttl, reset_token_ttl);
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shop-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
