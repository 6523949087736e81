//! Request gating: client whitelist, then credentials.

use std::{fmt, net::SocketAddr, sync::Arc};

use axum::{
    body::{Body, to_bytes},
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use torrent_api_types::BitTorrent;

use crate::{AppState, context::RequestContext, response::ApiError};

/// Largest request body read for parameters.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// The daemon client opened for the current request.
#[derive(Clone)]
pub(crate) struct Session(pub(crate) Arc<dyn BitTorrent>);

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session")
    }
}

/// Rejects clients whose address is not whitelisted.
pub(crate) async fn whitelist(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if !state.whitelist.allows(peer) {
        warn!("Denied request from {peer:?}");
        return ApiError::Forbidden.into_response();
    }
    next.run(request).await
}

/// Reads the request parameters, requires credentials and opens a daemon session.
///
/// The body is buffered and put back so later extractors can still read it.
pub(crate) async fn authenticate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        warn!("Failed reading request body: {e}");
        ApiError::BadRequest("Invalid arguments: Unreadable request body.".to_string())
    })?;

    let context = RequestContext::parse(&bytes, parts.uri.query());
    let Some(credentials) = context.credentials() else {
        debug!("Request to {} without credentials", parts.uri.path());
        return Err(ApiError::Unauthorized);
    };

    let client = state.connector.connect(&credentials)?;
    parts.extensions.insert(Session(client));
    parts.extensions.insert(context);

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
