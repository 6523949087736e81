//! Per-request client factory.

use std::{sync::Arc, time::Duration};

use url::Url;

use torrent_api_types::{BitTorrent, BitTorrentError, Connector, Credentials};

use crate::client::{TransmissionClient, parse_rpc_url};

/// Builds a [`TransmissionClient`] for each request's credentials.
///
/// Clients do not share session ids.
#[derive(Debug, Clone)]
pub struct TransmissionConnector {
    url: Url,
    timeout: Duration,
}

impl TransmissionConnector {
    /// Create a connector for the daemon at `rpc_url`.
    ///
    /// `timeout` bounds each whole RPC call.
    pub fn try_new(rpc_url: &str, timeout: Duration) -> Result<Self, BitTorrentError> {
        Ok(Self {
            url: parse_rpc_url(rpc_url)?,
            timeout,
        })
    }

    /// The daemon RPC endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Connector for TransmissionConnector {
    fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn BitTorrent>, BitTorrentError> {
        Ok(Arc::new(TransmissionClient::from_parts(
            self.url.clone(),
            credentials.clone(),
            self.timeout,
        )))
    }
}
