use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::generator::GenerationError;

/// Errors surfaced by HTTP handlers. This is the only place that decides
/// status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

const INTERNAL_DETAIL: &str = "Internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Generation(GenerationError::SchemaMismatch(msg)) => {
                tracing::error!(error = %msg, "❌ Outfit response failed schema validation");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL.to_string())
            }
            ApiError::Generation(err) => {
                tracing::error!(error = %err, "❌ Failed to generate outfits");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "❌ Unexpected error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL.to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Response for a handler that panicked. Goes through [`ApiError`] so the
/// body has the same shape as every other 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    ApiError::Internal(format!("handler panicked: {message}")).into_response()
}
