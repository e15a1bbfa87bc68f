//! Router assembly for the monitor web server.
//!
//! [`build_router`] wires the page and the remote command route with CORS and
//! tracing middleware layers.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router.
///
/// Routes use axum 0.8 `/{*param}` wildcard syntax.
/// CORS is permissive (status pages may poll from other origins).
/// TraceLayer provides request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Process list page
        .route("/", get(handlers::index::index))
        .route("/index", get(handlers::index::index))
        // Remote web commands
        .route("/api/{*command}", get(handlers::api::api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
