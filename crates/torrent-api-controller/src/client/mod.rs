//! Transmission RPC client implementation.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use torrent_api_types::{BitTorrent, BitTorrentError, Credentials, Torrent, TorrentIdentifier};

use crate::conversions::RpcTorrentWrapper;
use crate::ops::TransmissionOps;
use crate::rpc::{RpcClient, RpcError, TorrentAction};


/// TransmissionClient is a BitTorrent client that uses Transmission RPC.
#[allow(missing_debug_implementations, private_bounds)]
pub struct TransmissionClient<T: TransmissionOps = RpcClient> {
    client: T,
}

impl TransmissionClient {
    /// Create a new TransmissionClient for `credentials`.
    ///
    /// No request is sent here. The session id is negotiated on the first call, and `timeout`
    /// bounds each call.
    pub fn try_new(
        rpc_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, BitTorrentError> {
        Ok(Self::from_parts(parse_rpc_url(rpc_url)?, credentials, timeout))
    }

    pub(crate) fn from_parts(url: Url, credentials: Credentials, timeout: Duration) -> Self {
        debug!("Using Transmission RPC at {url} as {}", credentials.username);
        Self {
            client: RpcClient::new(url, credentials, timeout),
        }
    }
}

#[allow(private_bounds)]
impl<T: TransmissionOps> TransmissionClient<T> {
    /// Create a TransmissionClient with a custom client implementation.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_client(client: T) -> Self {
        Self { client }
    }

    async fn fetch(
        &self,
        ids: Option<Vec<TorrentIdentifier>>,
    ) -> Result<Vec<Torrent>, BitTorrentError> {
        let torrents = self
            .client
            .torrent_get(ids)
            .await
            .map_err(map_client_error)?
            .into_iter()
            .map(|torrent| Torrent::from(RpcTorrentWrapper(torrent)))
            .collect();
        Ok(torrents)
    }

    async fn act(&self, action: TorrentAction, torrent: &Torrent) -> Result<(), BitTorrentError> {
        debug!("Sending {} for torrent {}", action.method(), torrent.hash);
        self.client
            .torrent_action(action, vec![hash_of(torrent)])
            .await
            .map_err(map_client_error)?;
        debug!("{} command sent", action.method());
        Ok(())
    }
}

#[async_trait]
#[allow(private_bounds)]
impl<T: TransmissionOps> BitTorrent for TransmissionClient<T> {
    async fn list(&self) -> Result<Vec<Torrent>, BitTorrentError> {
        debug!("Listing torrents");
        let torrents = self.fetch(None).await?;
        debug!("Listed {} torrents", torrents.len());
        Ok(torrents)
    }

    async fn get(
        &self,
        identifier: &TorrentIdentifier,
    ) -> Result<Option<Torrent>, BitTorrentError> {
        debug!("Getting torrent {identifier}");
        let torrent = self
            .fetch(Some(vec![identifier.clone()]))
            .await?
            .into_iter()
            .next();
        debug!("Torrent {identifier} found: {}", torrent.is_some());
        Ok(torrent)
    }

    async fn add(&self, uri: &str) -> Result<Option<Torrent>, BitTorrentError> {
        debug!("Adding torrent from {uri}");
        // A rejected torrent comes back as an error result without the torrent arguments.
        let added = self.client.torrent_add(uri).await.map_err(|e| match e {
            RpcError::Result(msg) | RpcError::Malformed(msg) => {
                BitTorrentError::InvalidTorrent(msg)
            }
            e => map_client_error(e),
        })?;
        let Some(hash) = added.and_then(|torrent| torrent.hash_string) else {
            debug!("Daemon reported no torrent for {uri}");
            return Ok(None);
        };

        debug!("Added torrent {hash}");
        // The add result only carries id, name and hash.
        self.get(&TorrentIdentifier::Hash(hash)).await
    }

    async fn remove(
        &self,
        torrent: &Torrent,
        delete_local_data: bool,
    ) -> Result<(), BitTorrentError> {
        debug!(
            "Removing torrent {}, delete_local_data={delete_local_data}",
            torrent.hash
        );
        self.client
            .torrent_remove(vec![hash_of(torrent)], delete_local_data)
            .await
            .map_err(map_client_error)?;
        debug!("Remove command sent");
        Ok(())
    }

    async fn start(&self, torrent: &Torrent, now: bool) -> Result<(), BitTorrentError> {
        let action = if now {
            TorrentAction::StartNow
        } else {
            TorrentAction::Start
        };
        self.act(action, torrent).await
    }

    async fn stop(&self, torrent: &Torrent) -> Result<(), BitTorrentError> {
        self.act(TorrentAction::Stop, torrent).await
    }

    async fn verify(&self, torrent: &Torrent) -> Result<(), BitTorrentError> {
        self.act(TorrentAction::Verify, torrent).await
    }

    async fn reannounce(&self, torrent: &Torrent) -> Result<(), BitTorrentError> {
        self.act(TorrentAction::Reannounce, torrent).await
    }
}

/// Mutations address torrents by hash, which is stable across daemon restarts.
fn hash_of(torrent: &Torrent) -> TorrentIdentifier {
    TorrentIdentifier::Hash(torrent.hash.clone())
}

pub(crate) fn parse_rpc_url(rpc_url: &str) -> Result<Url, BitTorrentError> {
    Url::from_str(rpc_url).map_err(|e| BitTorrentError::Other(format!("Invalid RPC URL: {e}")))
}

/// Maps RPC transport errors to BitTorrent errors.
fn map_client_error(err: RpcError) -> BitTorrentError {
    match err {
        RpcError::Transport(msg) => BitTorrentError::Network(msg),
        e @ RpcError::Timeout(_) => BitTorrentError::Network(e.to_string()),
        RpcError::Unauthorized => BitTorrentError::Unauthorized,
        RpcError::Malformed(msg) => BitTorrentError::Other(msg),
        RpcError::Result(msg) => BitTorrentError::ServerError(msg),
        RpcError::Other(msg) => BitTorrentError::ServerError(msg),
    }
}
