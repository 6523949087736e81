//! # Torrent API Types
//!
//! This crate defines the torrent snapshot model, the client traits and the JSON mapping used by
//! the Transmission REST bridge.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

mod identifier;
pub mod mapping;
mod model;
pub mod serializer;

pub use identifier::{InvalidIdentifier, TorrentIdentifier};
pub use mapping::{FieldMapping, Mappable, MappingError, Record, map_object};
pub use model::{File, Peer, Torrent, Tracker, TrackerStats};
pub use serializer::{torrent_to_record, torrents_to_records};

/// Error type for BitTorrent operations.
#[derive(Error, Debug)]
pub enum BitTorrentError {
    /// The daemon could not be reached (connection refused, timeout, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// The daemon rejected the credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The daemon returned an error response.
    #[error("server error: {0}")]
    ServerError(String),

    /// The daemon refused or could not parse the torrent.
    #[error("invalid torrent: {0}")]
    InvalidTorrent(String),

    /// Other unexpected errors
    #[error("unexpected error: {0}")]
    Other(String),
}

/// Credentials forwarded to the daemon.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The RPC username.
    pub username: String,
    /// The RPC password.
    pub password: String,
}

impl Credentials {
    /// Returns credentials if both parts are present and non-empty.
    pub fn new(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self {
                    username: username.to_string(),
                    password: password.to_string(),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the password.
        write!(f, "Credentials(username=\"{}\", password=<set>)", self.username)
    }
}

/// BitTorrent trait defines the operations the REST API forwards to a daemon.
#[async_trait]
pub trait BitTorrent: Send + Sync {
    /// List all torrents.
    async fn list(&self) -> Result<Vec<Torrent>, BitTorrentError>;
    /// Get a single torrent. Returns `Ok(None)` if the daemon does not know it.
    async fn get(
        &self,
        identifier: &TorrentIdentifier,
    ) -> Result<Option<Torrent>, BitTorrentError>;
    /// Add a torrent from a URI (magnet link, URL or path readable by the daemon).
    /// Returns `Ok(None)` if the daemon accepted the call but reported no torrent.
    async fn add(&self, uri: &str) -> Result<Option<Torrent>, BitTorrentError>;
    /// Remove a torrent. If `delete_local_data` is true, its downloaded data is deleted as well.
    async fn remove(&self, torrent: &Torrent, delete_local_data: bool)
    -> Result<(), BitTorrentError>;
    /// Start a torrent. If `now` is true, the download queue is bypassed.
    async fn start(&self, torrent: &Torrent, now: bool) -> Result<(), BitTorrentError>;
    /// Stop a torrent.
    async fn stop(&self, torrent: &Torrent) -> Result<(), BitTorrentError>;
    /// Start verifying a torrent's local data.
    async fn verify(&self, torrent: &Torrent) -> Result<(), BitTorrentError>;
    /// Ask a torrent's trackers for more peers.
    async fn reannounce(&self, torrent: &Torrent) -> Result<(), BitTorrentError>;
}

/// Opens a [`BitTorrent`] client for one request.
pub trait Connector: Send + Sync {
    /// Returns a client authenticated with `credentials`. Must not contact the daemon.
    fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn BitTorrent>, BitTorrentError>;
}
