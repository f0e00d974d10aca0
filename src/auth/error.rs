use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::auth::store::{DuplicateField, StoreError};

/// Client-facing error surface. Every variant except `Store` and
/// `Internal` is fully recovered into a structured response; only
/// server-side failures return a generic 500 body with no internal
/// detail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid value for field {field}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("duplicate value for field {}", .0.as_str())]
    Duplicate(DuplicateField),
    #[error("unauthorized")]
    Unauthorized,
    #[error("store unavailable")]
    Store(#[source] StoreError),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        ApiError::Validation { field, message }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(field) => ApiError::Duplicate(field),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Could not create user",
                    "errors": { (field): message },
                })),
            )
                .into_response(),
            ApiError::Duplicate(field) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Could not create user",
                    "errors": { (field.as_str()): "is already taken" },
                })),
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "loggedOut": true })),
            )
                .into_response(),
            ApiError::Store(e) => {
                error!(error = %e, "store unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Service unavailable" })),
                )
                    .into_response()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
