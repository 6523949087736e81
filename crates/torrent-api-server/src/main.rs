//! # Torrent API
//!
//! ## Usage
//!
//! ```sh,ignore
//! cargo run --release --bin torrent-api -- --listen 127.0.0.1:8080 --whitelist localhost
//! ```

use std::sync::Arc;

use axum as _;
use clap::Parser;
use serde as _;
use serde_json as _;
use thiserror as _;
use tokio::{
    net::TcpListener,
    signal::unix::{SignalKind, signal},
    task::JoinHandle,
};
use torrent_api_types as _;
use tower_http as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url as _;

use torrent_api_controller::TransmissionConnector;
use torrent_api_server::{AppState, DaemonConfig, cli::Cli, serve};

#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use test_log as _;
#[cfg(test)]
use tower as _;

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Spawns and returns the signals listener task.
fn spawn_signal_listener() -> Result<JoinHandle<()>, Box<dyn std::error::Error>> {
    // Setup unix signals to listen to.
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let signals = tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => {},
            _ = sigterm.recv() => {},
        }
    });

    Ok(signals)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let daemon = DaemonConfig::from_env().inspect_err(|e| error!("Invalid configuration: {e}"))?;
    let config = cli.into_config(daemon);
    info!("Starting with {config:?}");

    let connector =
        TransmissionConnector::try_new(&config.daemon.rpc_url(), config.daemon.timeout)?;
    info!("Forwarding to Transmission RPC at {}", connector.url());
    let state = AppState::new(Arc::new(connector), config.whitelist);

    let listener = TcpListener::bind(config.listen).await?;
    let signals = spawn_signal_listener()?;
    serve(listener, state, async move {
        let _ = signals.await;
        info!("Shutting down");
    })
    .await?;

    info!("Stopped");
    Ok(())
}
