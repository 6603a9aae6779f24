// src/api/error.rs

//! API error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::errors::Gha2ArgoError;
use crate::types::JobFailure;

/// Every failure a handler can surface. Bodies are plain text.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Only {allowed} method is allowed")]
    MethodNotAllowed { allowed: &'static str },

    #[error("Request body is empty")]
    EmptyBody,

    #[error("Failed to read request body: {0}")]
    UnreadableBody(String),

    #[error("Server busy, queue is full")]
    QueueFull,

    #[error("Failed to process job: {0}")]
    ConversionFailed(JobFailure),

    #[error("Service is shutting down")]
    ShuttingDown,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::EmptyBody | Self::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            Self::QueueFull | Self::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
            Self::ConversionFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl From<Gha2ArgoError> for ApiError {
    fn from(err: Gha2ArgoError) -> Self {
        match err {
            Gha2ArgoError::QueueFull => Self::QueueFull,
            Gha2ArgoError::QueueClosed => Self::ShuttingDown,
            Gha2ArgoError::JobAbandoned(id) => {
                Self::Internal(format!("job {id} ended without producing a result"))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}
