//! Typed failures for the mutating operations.
//!
//! Read paths absorb every failure into an empty or absent result; these
//! errors exist so the boundary can report correct semantics for writes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::model::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("employee not found for id={0}")]
    NotFound(String),

    #[error("failed to delete employee name={0}")]
    Conflict(String),

    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Validation(details) => {
                tracing::warn!(errors = details.len(), "400: validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Validation failed", "details": details })),
                )
                    .into_response()
            }
            GatewayError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            GatewayError::Conflict(_) => (
                StatusCode::CONFLICT,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            GatewayError::Unavailable(_) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
        }
    }
}
