//! The JSON envelope every request ends in.
//!
//! Success and failure both render as `{"error": 0|1, ...}` with `Content-Type: application/json`.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use torrent_api_types::{
    BitTorrentError, MappingError, Record, Torrent, TorrentIdentifier, torrent_to_record,
    torrents_to_records,
};

/// Response body shared by all endpoints.
#[derive(Serialize, Debug, Default, PartialEq)]
pub struct Envelope {
    /// `0` on success, `1` on failure.
    pub error: u8,
    /// Human-readable outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// A single serialized torrent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torrent: Option<Record>,
    /// A list of serialized torrents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torrents: Option<Vec<Record>>,
    /// Follow-up command paths for [`Envelope::torrent`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Command paths for one torrent.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Links {
    pub start: String,
    pub stop: String,
    pub verify: String,
    pub reannounce: String,
}

impl Links {
    fn under(target: &dyn fmt::Display) -> Self {
        Self {
            start: format!("/torrent/{target}/start"),
            stop: format!("/torrent/{target}/stop"),
            verify: format!("/torrent/{target}/verify"),
            reannounce: format!("/torrent/{target}/reannounce"),
        }
    }
}

/// A successful response.
#[derive(Debug, PartialEq)]
pub struct ApiResponse(pub Envelope);

impl ApiResponse {
    /// `{"error":0,"torrents":[...]}`
    pub fn torrents(torrents: &[Torrent]) -> Result<Self, ApiError> {
        Ok(Self(Envelope {
            torrents: Some(torrents_to_records(torrents)?),
            ..Default::default()
        }))
    }

    /// A single torrent with an optional message. Its command links are addressed by hash.
    pub fn torrent(message: Option<&str>, torrent: &Torrent) -> Result<Self, ApiError> {
        Ok(Self(Envelope {
            message: message.map(str::to_string),
            torrent: Some(torrent_to_record(torrent)?),
            links: Some(Links::under(&torrent.hash)),
            ..Default::default()
        }))
    }

    /// A torrent looked up by `identifier`, with command links addressed the same way.
    pub fn found(identifier: &TorrentIdentifier, torrent: &Torrent) -> Result<Self, ApiError> {
        Ok(Self(Envelope {
            torrent: Some(torrent_to_record(torrent)?),
            links: Some(Links::under(identifier)),
            ..Default::default()
        }))
    }

    /// A message and a torrent with no command links, for torrents that no longer exist.
    pub fn removed(message: &str, torrent: &Torrent) -> Result<Self, ApiError> {
        Ok(Self(Envelope {
            message: Some(message.to_string()),
            torrent: Some(torrent_to_record(torrent)?),
            ..Default::default()
        }))
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Every way a request can fail. The display text is the response message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing credentials, or credentials the daemon rejected.
    #[error("Unauthorized request.")]
    Unauthorized,

    /// The client address is not whitelisted.
    #[error("Access denied.")]
    Forbidden,

    /// A required parameter is missing or the body could not be read.
    #[error("{0}")]
    BadRequest(String),

    /// No route matches the request.
    #[error("Requested endpoint could not be found.")]
    EndpointNotFound,

    /// The daemon does not know the torrent.
    #[error("Torrent not found.")]
    TorrentNotFound,

    /// The daemon could not be reached.
    #[error("Internal Server Error. Unable to connect to Transmission.")]
    Unreachable,

    /// The daemon did not add the torrent.
    #[error("Torrent could not be added.")]
    AddFailed,

    /// Any other failure.
    #[error("Internal Server Error.")]
    Internal,
}

impl ApiError {
    /// The HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::EndpointNotFound | Self::TorrentNotFound => StatusCode::NOT_FOUND,
            Self::Unreachable | Self::AddFailed | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BitTorrentError> for ApiError {
    fn from(err: BitTorrentError) -> Self {
        match err {
            BitTorrentError::Network(e) => {
                error!("Failed to reach Transmission: {e}");
                Self::Unreachable
            }
            BitTorrentError::Unauthorized => {
                warn!("Transmission rejected the request credentials");
                Self::Unauthorized
            }
            BitTorrentError::InvalidTorrent(e) => {
                warn!("Transmission refused the torrent: {e}");
                Self::AddFailed
            }
            e @ (BitTorrentError::ServerError(_) | BitTorrentError::Other(_)) => {
                error!("Transmission call failed: {e}");
                Self::Internal
            }
        }
    }
}

impl From<MappingError> for ApiError {
    fn from(err: MappingError) -> Self {
        error!("Failed to serialize torrent: {err}");
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            error: 1,
            message: Some(self.to_string()),
            ..Default::default()
        };
        (self.status(), Json(envelope)).into_response()
    }
}
