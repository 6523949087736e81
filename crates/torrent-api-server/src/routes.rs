use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    AppState, handlers,
    middleware::{authenticate, whitelist},
};

/// Builds the API router.
///
/// Requests pass the whitelist, then credential checks, before any route is matched. A wrong
/// method on a known path answers like an unknown path.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/torrent",
            get(handlers::list)
                .post(handlers::add)
                .fallback(handlers::not_found),
        )
        .route(
            "/torrent/{torrent}",
            get(handlers::get)
                .delete(handlers::delete)
                .fallback(handlers::not_found),
        )
        .route(
            "/torrent/{torrent}/start",
            get(handlers::start).fallback(handlers::not_found),
        )
        .route(
            "/torrent/{torrent}/stop",
            get(handlers::stop).fallback(handlers::not_found),
        )
        .route(
            "/torrent/{torrent}/verify",
            get(handlers::verify).fallback(handlers::not_found),
        )
        .route(
            "/torrent/{torrent}/reannounce",
            get(handlers::reannounce).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn_with_state(state, whitelist))
        .layer(TraceLayer::new_for_http())
}
