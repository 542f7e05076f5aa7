//! Race endpoints.
//!
//! Mirrors the meet endpoints under `/api/v1/races`. Races carry no tags,
//! so a `nearby` search with a tag filter never matches a race.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use revnroll_db::JoinOutcome;
use revnroll_types::{EventKind, Race, RaceId, RaceRequest};
use validator::Validate;

use crate::caller::Caller;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::{NearbyQuery, list_events, nearby_events};
use crate::state::AppState;

/// Create a race owned by the caller.
pub async fn create_race(
    State(state): State<Arc<AppState>>,
    Caller(user): Caller,
    ApiJson(request): ApiJson<RaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    let race = state.repository.create_race(&request, user).await?;
    tracing::info!(race_id = %race.id, creator = %user, race_type = %race.race_type, "Race created");
    Ok((StatusCode::CREATED, Json(race)))
}

/// Replace the editable fields of a race.
pub async fn update_race(
    State(state): State<Arc<AppState>>,
    Caller(_user): Caller,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<RaceRequest>,
) -> Result<Json<Race>, ApiError> {
    request.validate()?;
    state
        .repository
        .update_race(RaceId(id), &request)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("race {id}")))
}

/// Fetch one race with its participants.
pub async fn get_race(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Race>, ApiError> {
    state
        .repository
        .get_race(RaceId(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("race {id}")))
}

/// Delete a race.
pub async fn delete_race(
    State(state): State<Arc<AppState>>,
    Caller(_user): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    if state.repository.delete(EventKind::Race, id).await? {
        tracing::info!(race_id = id, "Race deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("race {id}")))
    }
}

/// Add the caller to a race's participants.
pub async fn join_race(
    State(state): State<Arc<AppState>>,
    Caller(user): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    match state.repository.join(EventKind::Race, id, user).await? {
        JoinOutcome::Joined => Ok(StatusCode::NO_CONTENT),
        JoinOutcome::AlreadyJoined => Err(ApiError::Conflict(format!(
            "user {user} already joined race {id}"
        ))),
        JoinOutcome::NotFound => Err(ApiError::NotFound(format!("race {id}"))),
    }
}

/// List every race as a summary.
pub async fn list_races(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    list_events(&state, EventKind::Race).await
}

/// Upcoming races within `distance_in_km` of a point.
pub async fn nearby_races(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<NearbyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    nearby_events(&state, EventKind::Race, &params).await
}
