//! Request extractors whose rejections are reported as [`ApiError`].
//!
//! Axum's stock `Json`, `Query` and `Path` answer malformed input with a
//! plain-text body (and `422` for JSON that parses but does not match the
//! target type). These wrappers route every such failure through
//! [`ApiError::BadRequest`] so clients always get the JSON error body.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Deserialized query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Deserialized path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
