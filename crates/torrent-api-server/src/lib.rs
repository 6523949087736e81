//! # Torrent API Server
//!
//! A REST API for a Transmission daemon. Each request carries the daemon credentials as
//! `username` and `password` parameters and is forwarded over Transmission RPC.
//!
//! ## Usage
//!
//! ```sh,ignore
//! TRANSMISSION_HOST=127.0.0.1 cargo run --release --bin torrent-api -- --listen 127.0.0.1:8080
//! curl 'http://127.0.0.1:8080/torrent?username=admin&password=secret'
//! ```

use std::{fmt, future::Future, io, net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy as _;
use serde_json as _;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber as _;

use torrent_api_controller as _;
use torrent_api_types::Connector;

pub mod cli;
pub mod config;
pub mod context;
mod handlers;
mod middleware;
pub mod response;
mod routes;

pub use config::{ApiConfig, ConfigError, DaemonConfig, Whitelist};

#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use test_log as _;
#[cfg(test)]
use tower as _;

/// Shared state of the API: how to reach the daemon and who may call.
#[derive(Clone)]
pub struct AppState {
    connector: Arc<dyn Connector>,
    whitelist: Arc<Whitelist>,
}

impl AppState {
    /// Returns a new [`AppState`].
    pub fn new(connector: Arc<dyn Connector>, whitelist: Whitelist) -> Self {
        Self {
            connector,
            whitelist: Arc::new(whitelist),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("whitelist", &self.whitelist)
            .finish_non_exhaustive()
    }
}

/// Returns the API router for `state`.
pub fn app(state: AppState) -> Router {
    routes::router(state)
}

/// Serves the API on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Torrent API listening on {}", listener.local_addr()?);
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}
