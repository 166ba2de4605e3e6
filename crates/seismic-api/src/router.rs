//! Axum router construction for the catalog API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin dashboard access.

use axum::Router;
use axum::routing::get;
use seismic_core::CatalogStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the catalog server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `POST /api/earthquakes` -- register an event report
/// - `GET /api/earthquakes` -- list catalog records
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router<S: CatalogStore + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route(
            "/api/earthquakes",
            get(handlers::list::<S>).post(handlers::register::<S>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
