//! Error types and handling
//!
//! All errors leave the service as the same JSON envelope:
//! `{"error": "...", "details": ...}`, with `details` carrying the raw
//! upstream payload when there is one. Upstream failures keep the status
//! code Lyzr reported; transport failures collapse to 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::lyzr::LyzrError;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request - invalid input (400)
    #[error("{0}")]
    BadRequest(String),

    /// The Lyzr API answered with a non-success status
    #[error("Lyzr API call failed")]
    Upstream {
        status: StatusCode,
        details: serde_json::Value,
    },

    /// The Lyzr API could not be reached (connect failure, timeout)
    #[error("Lyzr API call failed")]
    UpstreamUnreachable(String),

    /// Service unavailable - missing upstream credentials (503)
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Internal server error (500)
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
    /// Raw upstream detail, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details, should_log) = match self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, None, false),
            AppError::Upstream { status, ref details } => (status, Some(details.clone()), true),
            AppError::UpstreamUnreachable(ref message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(serde_json::Value::String(message.clone())),
                true,
            ),
            AppError::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, None, true),
            AppError::Internal(ref message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(serde_json::Value::String(message.clone())),
                true,
            ),
        };

        // Log server-side errors
        if should_log {
            error!(error = %self, status = %status, "Request error");
        }

        let body = ErrorBody {
            error: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LyzrError> for AppError {
    fn from(err: LyzrError) -> Self {
        match err {
            LyzrError::Status { status, details } => AppError::Upstream { status, details },
            LyzrError::Transport(e) => AppError::UpstreamUnreachable(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
