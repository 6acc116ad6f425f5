//! Facet-Fetch quest ledger — HTTP API.
//!
//! Exposes the role registry and the quest enrollment registry of one
//! ledger instance over axum.

pub mod bootstrap;
pub mod caller;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/access", routes::access::router())
        .nest("/api/v1/quests", routes::quests::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
