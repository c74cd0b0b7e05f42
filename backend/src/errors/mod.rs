//! Global application error types and handlers.
//!
//! `AggregateError` is what the aggregation pipeline returns; `ApiError` is
//! its HTTP face and turns every failure into a 500 carrying only the error's
//! message text.

use adapters::AdapterError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    /// The products endpoint returned an empty mapping.
    #[error("No products found.")]
    NoProducts,

    #[error(transparent)]
    Upstream(#[from] AdapterError),
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] AggregateError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.0.to_string();
        tracing::debug!(%detail, "responding with internal server error");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": detail }))).into_response()
    }
}
