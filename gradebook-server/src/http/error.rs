//! API error types with IntoResponse
//!
//! Every failure is rendered as `{status, message, timestamp}` where
//! `timestamp` is epoch milliseconds.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::ValidationError;
use crate::service::ServiceError;

/// Message for every not-found response, whichever entity was missing
pub const STUDENT_OR_GRADE_WAS_NOT_FOUND: &str = "Student or Grade was not found";

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    pub timestamp: i64,
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Student or grade does not resolve (404)
    NotFound,

    /// No route matches the request path (404)
    NoRoute { path: String },

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Malformed or rejected input (400)
    BadRequest { message: String },

    /// Request exceeded the configured timeout (408)
    Timeout,

    /// Unexpected failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::NoRoute { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound => STUDENT_OR_GRADE_WAS_NOT_FOUND.to_owned(),
            Self::NoRoute { path } => format!("no route for {}", path),
            Self::MethodNotAllowed => "method not allowed".to_owned(),
            Self::BadRequest { message } => message,
            Self::Timeout => "request timed out".to_owned(),
            Self::Internal { message } => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", message);
                "an internal error occurred".to_owned()
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound { resource, id } => {
                tracing::debug!(resource, %id, "not found");
                Self::NotFound
            }
            ServiceError::BadRequest(message) => Self::BadRequest { message },
            ServiceError::Internal(e) => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}
