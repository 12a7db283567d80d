//! HTTP API route definitions.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{healthz, hello, info, not_found, readyz, status, AppState};

/// Create the API router.
///
/// The route table is fixed at startup; dispatch is an exact
/// (method, path) match. Non-GET methods on known paths fall through to
/// the same 404 as unknown paths.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Greeting endpoints
        .route("/", get(hello).fallback(not_found))
        .route("/api/hello", get(hello).fallback(not_found))
        // Probe endpoints
        .route("/healthz", get(healthz).fallback(not_found))
        .route("/readyz", get(readyz).fallback(not_found))
        // Status endpoints
        .route("/api/status", get(status).fallback(not_found))
        .route("/api/info", get(info).fallback(not_found))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
