//! # Torrent controller using Transmission RPC.
//!
//! usage:
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use torrent_api_controller::TransmissionClient;
//! use torrent_api_types::{BitTorrent, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new(Some("admin"), Some("secret")).ok_or("no credentials")?;
//!     let client = TransmissionClient::try_new(
//!         "http://127.0.0.1:9091/transmission/rpc",
//!         credentials,
//!         Duration::from_secs(10),
//!     )?;
//!     let torrent = client.add("magnet:?xt=urn:btih:...").await?;
//!     println!("Added torrent: {:?}", torrent);
//!     Ok(())
//! }
//! ```
//!

#![cfg_attr(test, recursion_limit = "256")]

mod client;
mod connector;
mod conversions;
mod ops;
pub mod rpc;

#[cfg(test)]
mod testutil;

pub use client::TransmissionClient;
pub use connector::TransmissionConnector;

// Used by the integration tests only.
#[cfg(test)]
use axum as _;
#[cfg(test)]
use test_log as _;
#[cfg(test)]
use tracing_subscriber as _;
