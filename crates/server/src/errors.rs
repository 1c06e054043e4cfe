use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::CoreError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Failure surfaced to HTTP clients as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

// Store failures
impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        error!(err = %e, "submission store failed");
        ApiError::internal(e.to_string())
    }
}

// Backend hop failures (frontend only)
impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        error!(err = %e, "backend request failed");
        ApiError::bad_gateway(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
