//! Meet endpoints.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/v1/meets` | Create a meet |
//! | `GET` | `/api/v1/meets` | List meets |
//! | `GET` | `/api/v1/meets/nearby` | Meets near a point |
//! | `GET` | `/api/v1/meets/{id}` | Get a meet |
//! | `PUT` | `/api/v1/meets/{id}` | Update a meet |
//! | `DELETE` | `/api/v1/meets/{id}` | Delete a meet |
//! | `PUT` | `/api/v1/meets/{id}/join` | Join a meet |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use revnroll_db::JoinOutcome;
use revnroll_types::{EventKind, Meet, MeetId, MeetRequest};
use validator::Validate;

use crate::caller::Caller;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::{NearbyQuery, list_events, nearby_events};
use crate::state::AppState;

/// Create a meet owned by the caller.
pub async fn create_meet(
    State(state): State<Arc<AppState>>,
    Caller(user): Caller,
    ApiJson(request): ApiJson<MeetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    let meet = state.repository.create_meet(&request, user).await?;
    tracing::info!(meet_id = %meet.id, creator = %user, "Meet created");
    Ok((StatusCode::CREATED, Json(meet)))
}

/// Replace the editable fields of a meet.
pub async fn update_meet(
    State(state): State<Arc<AppState>>,
    Caller(_user): Caller,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<MeetRequest>,
) -> Result<Json<Meet>, ApiError> {
    request.validate()?;
    state
        .repository
        .update_meet(MeetId(id), &request)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("meet {id}")))
}

/// Fetch one meet with its participants.
pub async fn get_meet(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Meet>, ApiError> {
    state
        .repository
        .get_meet(MeetId(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("meet {id}")))
}

/// Delete a meet and its participant list.
pub async fn delete_meet(
    State(state): State<Arc<AppState>>,
    Caller(_user): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    if state.repository.delete(EventKind::Meet, id).await? {
        tracing::info!(meet_id = id, "Meet deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("meet {id}")))
    }
}

/// Add the caller to a meet's participants.
pub async fn join_meet(
    State(state): State<Arc<AppState>>,
    Caller(user): Caller,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    match state.repository.join(EventKind::Meet, id, user).await? {
        JoinOutcome::Joined => Ok(StatusCode::NO_CONTENT),
        JoinOutcome::AlreadyJoined => Err(ApiError::Conflict(format!(
            "user {user} already joined meet {id}"
        ))),
        JoinOutcome::NotFound => Err(ApiError::NotFound(format!("meet {id}"))),
    }
}

/// List every meet as a summary.
pub async fn list_meets(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    list_events(&state, EventKind::Meet).await
}

/// Upcoming meets within `distance_in_km` of a point, optionally by tag.
///
/// # Query Parameters
///
/// - `latitude`, `longitude`: search center (required)
/// - `distance_in_km`: radius (default 10)
/// - `tags`: comma-separated tag names
pub async fn nearby_meets(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<NearbyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    nearby_events(&state, EventKind::Meet, &params).await
}
