//! Error types for the REST API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that is
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use revnroll_db::DbError;
use revnroll_proximity::ProximityError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The body, query string or path could not be deserialized.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A query parameter combination cannot be evaluated.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A request body failed its field rules.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The caller could not be identified.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request conflicts with current state (e.g. joining twice).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The data layer failed.
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl From<ProximityError> for ApiError {
    fn from(err: ProximityError) -> Self {
        match err {
            ProximityError::InvalidQuery(msg) => Self::InvalidQuery(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::BadRequest(msg) | Self::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Self::Validation(_) => (
                StatusCode::BAD_REQUEST,
                String::from("request validation failed"),
            ),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Database(e) => {
                tracing::error!(error = %e, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("internal error"),
                )
            }
        };

        let mut body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });
        if let Self::Validation(errors) = &self {
            body["fields"] = serde_json::to_value(errors.field_errors())
                .unwrap_or(serde_json::Value::Null);
        }

        (status, axum::Json(body)).into_response()
    }
}
