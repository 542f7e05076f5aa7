//! Axum router construction for the Rev-n-Roll API.
//!
//! Assembles the meet and race routes into a single [`Router`] with CORS
//! and request tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, meets, races};

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness probe
/// - `GET|POST /api/v1/meets` -- list / create meets
/// - `GET /api/v1/meets/nearby` -- proximity search over meets
/// - `GET|PUT|DELETE /api/v1/meets/{id}` -- single meet
/// - `PUT /api/v1/meets/{id}/join` -- join a meet
/// - the same set under `/api/v1/races`
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // Meets
        .route(
            "/api/v1/meets",
            get(meets::list_meets).post(meets::create_meet),
        )
        .route("/api/v1/meets/nearby", get(meets::nearby_meets))
        .route(
            "/api/v1/meets/{id}",
            get(meets::get_meet)
                .put(meets::update_meet)
                .delete(meets::delete_meet),
        )
        .route("/api/v1/meets/{id}/join", put(meets::join_meet))
        // Races
        .route(
            "/api/v1/races",
            get(races::list_races).post(races::create_race),
        )
        .route("/api/v1/races/nearby", get(races::nearby_races))
        .route(
            "/api/v1/races/{id}",
            get(races::get_race)
                .put(races::update_race)
                .delete(races::delete_race),
        )
        .route("/api/v1/races/{id}/join", put(races::join_race))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
