use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;

/// Wire-level error: a status code plus the `{"error": kind, "message": ...}`
/// body every failed request carries.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self { status, kind, message: message.into() }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        // Exhaustive on purpose: a new service error kind must pick a status
        // here before it compiles.
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "NotFound", msg),
            ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, "InvalidInput", msg)
            }
            ServiceError::Store(msg) => {
                // Keep medium details out of the response body.
                error!(error = %msg, "store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "StoreError", "backing store unavailable")
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.kind, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
