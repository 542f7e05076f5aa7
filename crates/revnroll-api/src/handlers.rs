//! Handlers and query types shared by the meet and race endpoints.
//!
//! Listing and proximity search differ between meets and races only in the
//! [`EventKind`] they load, so both routers call into [`list_events`] and
//! [`nearby_events`].

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Json;
use axum::response::IntoResponse;
use revnroll_types::{DEFAULT_RADIUS_KM, EventKind, GeoPoint, ProximityQuery};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET .../nearby` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    /// Latitude of the search center in degrees.
    pub latitude: f64,
    /// Longitude of the search center in degrees.
    pub longitude: f64,
    /// Search radius in kilometers (default 10).
    pub distance_in_km: Option<f64>,
    /// Comma-separated tag names, e.g. `Drift,Show`.
    pub tags: Option<String>,
}

impl NearbyQuery {
    /// Convert into a [`ProximityQuery`].
    ///
    /// Tag names are trimmed and empty entries dropped. Range checks are
    /// left to the filter.
    pub fn to_proximity_query(&self) -> ProximityQuery {
        let tags: BTreeSet<String> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();

        ProximityQuery::new(GeoPoint::new(self.latitude, self.longitude))
            .with_radius_km(self.distance_in_km.unwrap_or(DEFAULT_RADIUS_KM))
            .with_tags(tags)
    }
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Shared list / nearby bodies
// ---------------------------------------------------------------------------

/// List every event of `kind` as summaries.
pub(crate) async fn list_events(
    state: &Arc<AppState>,
    kind: EventKind,
) -> Result<Json<serde_json::Value>, ApiError> {
    let events = state.repository.summaries(kind).await?;

    Ok(Json(serde_json::json!({
        "count": events.len(),
        "events": events,
    })))
}

/// Run the proximity filter over every event of `kind`.
pub(crate) async fn nearby_events(
    state: &Arc<AppState>,
    kind: EventKind,
    params: &NearbyQuery,
) -> Result<Json<serde_json::Value>, ApiError> {
    let query = params.to_proximity_query();
    let candidates = state.repository.candidates(kind).await?;
    let matched = state.filter.filter(&query, candidates)?;

    tracing::debug!(
        %kind,
        latitude = params.latitude,
        longitude = params.longitude,
        radius_km = query.radius_km,
        matched = matched.len(),
        "Nearby search"
    );

    let events: Vec<_> = matched.iter().map(revnroll_types::EventRecord::summary).collect();
    Ok(Json(serde_json::json!({
        "count": events.len(),
        "events": events,
    })))
}
