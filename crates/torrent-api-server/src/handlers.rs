//! Endpoint handlers. Each resolves its torrent, applies one command and returns the envelope.

use axum::{
    Extension,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::{info, instrument};

use torrent_api_types::{BitTorrent, BitTorrentError, Torrent, TorrentIdentifier};

use crate::{
    context::RequestContext,
    middleware::Session,
    response::{ApiError, ApiResponse},
};

type ApiResult = Result<ApiResponse, ApiError>;

/// The torrent addressed by the `{torrent}` path segment.
///
/// Segments that are neither an id nor a hash do not match any endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target(pub(crate) TorrentIdentifier);

impl<S: Send + Sync> FromRequestParts<S> for Target {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::EndpointNotFound)?;
        segment
            .parse()
            .map(Self)
            .map_err(|_| ApiError::EndpointNotFound)
    }
}

async fn find(
    client: &dyn BitTorrent,
    identifier: &TorrentIdentifier,
) -> Result<Torrent, ApiError> {
    client
        .get(identifier)
        .await?
        .ok_or(ApiError::TorrentNotFound)
}

/// `GET /torrent`
#[instrument(skip_all)]
pub(crate) async fn list(Extension(Session(client)): Extension<Session>) -> ApiResult {
    let torrents = client.list().await?;
    ApiResponse::torrents(&torrents)
}

/// `GET /torrent/{torrent}`
#[instrument(skip_all, fields(torrent = %target.0))]
pub(crate) async fn get(
    Extension(Session(client)): Extension<Session>,
    target: Target,
) -> ApiResult {
    let torrent = find(client.as_ref(), &target.0).await?;
    ApiResponse::found(&target.0, &torrent)
}

/// `POST /torrent` with `uri`.
#[instrument(skip_all)]
pub(crate) async fn add(
    Extension(Session(client)): Extension<Session>,
    Extension(context): Extension<RequestContext>,
) -> ApiResult {
    let uri = context.param("uri").ok_or_else(|| {
        ApiError::BadRequest("Invalid arguments: Missing uri parameter.".to_string())
    })?;

    let torrent = match client.add(uri).await {
        Ok(Some(torrent)) => torrent,
        Ok(None) | Err(BitTorrentError::InvalidTorrent(_)) => return Err(ApiError::AddFailed),
        Err(e) => return Err(e.into()),
    };
    info!("Added torrent {}", torrent.hash);
    ApiResponse::torrent(None, &torrent)
}

/// `DELETE /torrent/{torrent}`, with `files=1` to delete downloaded data too.
#[instrument(skip_all, fields(torrent = %target.0))]
pub(crate) async fn delete(
    Extension(Session(client)): Extension<Session>,
    Extension(context): Extension<RequestContext>,
    target: Target,
) -> ApiResult {
    let torrent = find(client.as_ref(), &target.0).await?;
    let delete_files = context.flag("files");
    client.remove(&torrent, delete_files).await?;
    info!("Deleted torrent {}, files deleted: {delete_files}", torrent.hash);
    ApiResponse::removed("Torrent deleted.", &torrent)
}

/// `GET /torrent/{torrent}/start`, with `now=1` to bypass the queue.
#[instrument(skip_all, fields(torrent = %target.0))]
pub(crate) async fn start(
    Extension(Session(client)): Extension<Session>,
    Extension(context): Extension<RequestContext>,
    target: Target,
) -> ApiResult {
    let torrent = find(client.as_ref(), &target.0).await?;
    client.start(&torrent, context.flag("now")).await?;
    ApiResponse::torrent(Some("Torrent started."), &torrent)
}

/// `GET /torrent/{torrent}/stop`
#[instrument(skip_all, fields(torrent = %target.0))]
pub(crate) async fn stop(
    Extension(Session(client)): Extension<Session>,
    target: Target,
) -> ApiResult {
    let torrent = find(client.as_ref(), &target.0).await?;
    client.stop(&torrent).await?;
    ApiResponse::torrent(Some("Torrent stopped."), &torrent)
}

/// `GET /torrent/{torrent}/verify`
#[instrument(skip_all, fields(torrent = %target.0))]
pub(crate) async fn verify(
    Extension(Session(client)): Extension<Session>,
    target: Target,
) -> ApiResult {
    let torrent = find(client.as_ref(), &target.0).await?;
    client.verify(&torrent).await?;
    ApiResponse::torrent(Some("Torrent verification started."), &torrent)
}

/// `GET /torrent/{torrent}/reannounce`
#[instrument(skip_all, fields(torrent = %target.0))]
pub(crate) async fn reannounce(
    Extension(Session(client)): Extension<Session>,
    target: Target,
) -> ApiResult {
    let torrent = find(client.as_ref(), &target.0).await?;
    client.reannounce(&torrent).await?;
    ApiResponse::torrent(Some("Torrent reannounce started."), &torrent)
}

/// Any unmatched path or method.
pub(crate) async fn not_found() -> ApiError {
    ApiError::EndpointNotFound
}
