//! Transmission RPC connection for a single set of credentials.
//!
//! [`transmission_rpc::TransClient`] builds the request envelope, sends basic auth and renegotiates
//! the session id when the daemon answers `409 Conflict`. This module bounds each call by a
//! timeout and sorts failures by cause.

use std::{error::Error as StdError, fmt, future::Future, io, time::Duration};

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;
use transmission_rpc::{
    TransClient,
    types::{BasicAuth, TorrentAction as RpcAction},
};
use url::Url;

use torrent_api_types::Credentials;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors raised by the RPC transport.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The request could not be sent (connection refused, DNS, reset).
    #[error("could not connect to Transmission: {0}")]
    Transport(String),

    /// The daemon did not answer in time.
    #[error("Transmission did not answer within {0:?}")]
    Timeout(Duration),

    /// The daemon answered with a body that is not JSON. It does so when it rejects credentials.
    #[error("access to Transmission requires authentication")]
    Unauthorized,

    /// The daemon answered JSON that does not match the call.
    #[error("unexpected Transmission response: {0}")]
    Malformed(String),

    /// The daemon processed the call and reported a non-success result.
    #[error("Transmission returned error: {0}")]
    Result(String),

    /// Anything else the RPC client reported, such as a missing session id.
    #[error("Transmission call failed: {0}")]
    Other(String),
}

impl RpcError {
    /// Sorts an RPC client failure by the first recognised cause in its source chain.
    pub(crate) fn classify(err: BoxError) -> Self {
        let root: &(dyn StdError + 'static) = &*err;
        let mut cause = Some(root);
        while let Some(e) = cause {
            if let Some(json) = e.downcast_ref::<serde_json::Error>() {
                if json.is_data() {
                    return Self::Malformed(json.to_string());
                }
                return Self::Unauthorized;
            }
            if e.downcast_ref::<io::Error>().is_some() {
                return Self::Transport(err.to_string());
            }
            cause = e.source();
        }
        Self::Other(err.to_string())
    }
}

/// Torrent commands that take only a list of ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorrentAction {
    /// Start, honouring the download queue.
    Start,
    /// Start immediately, bypassing the download queue.
    StartNow,
    /// Stop.
    Stop,
    /// Verify local data.
    Verify,
    /// Reannounce to trackers.
    Reannounce,
}

impl TorrentAction {
    /// The RPC method name for this action.
    pub fn method(self) -> &'static str {
        match self {
            Self::Start => "torrent-start",
            Self::StartNow => "torrent-start-now",
            Self::Stop => "torrent-stop",
            Self::Verify => "torrent-verify",
            Self::Reannounce => "torrent-reannounce",
        }
    }

    pub(crate) fn to_rpc(self) -> RpcAction {
        match self {
            Self::Start => RpcAction::Start,
            Self::StartNow => RpcAction::StartNow,
            Self::Stop => RpcAction::Stop,
            Self::Verify => RpcAction::Verify,
            Self::Reannounce => RpcAction::Reannounce,
        }
    }
}

/// A Transmission RPC connection for a single set of credentials.
///
/// The session id is cached for the lifetime of the value only. Calls are serialized because the
/// underlying client needs exclusive access to update it.
pub struct RpcClient {
    client: Mutex<TransClient>,
    url: Url,
    username: String,
    timeout: Duration,
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RpcClient {
    /// Returns a new client. No request is sent until the first call.
    pub fn new(url: Url, credentials: Credentials, timeout: Duration) -> Self {
        let Credentials { username, password } = credentials;
        let auth = BasicAuth {
            user: username.clone(),
            password,
        };
        Self {
            client: Mutex::new(TransClient::with_auth(url.clone(), auth)),
            url,
            username,
            timeout,
        }
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, TransClient> {
        self.client.lock().await
    }

    /// Awaits `call`, giving up after the configured timeout.
    pub(crate) async fn bounded<T, E>(
        &self,
        method: &str,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, RpcError>
    where
        E: Into<BoxError>,
    {
        debug!("Calling {method} at {}", self.url);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| RpcError::classify(e.into())),
            Err(_) => Err(RpcError::Timeout(self.timeout)),
        }
    }
}

/// Fails unless the daemon reported `success` for `method`.
pub(crate) fn check(method: &str, result: String) -> Result<(), RpcError> {
    if result == "success" {
        return Ok(());
    }
    debug!("{method} failed: {result}");
    Err(RpcError::Result(result))
}
