//! Error types for the HTTP boundary.
//!
//! Core operations return [`crate::errors::Error`]; this module owns the
//! mapping onto status codes and the JSON error envelope. Handlers just use
//! `?` — the `From` impl picks the right status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::errors::Error;

/// HTTP-facing error: a status code plus a user-facing message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create a 400 Bad Request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Human-readable error message
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Validation { .. }
            | Error::InvalidStatus { .. }
            | Error::InsufficientStock { .. }
            | Error::ProductInUse { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Config { .. }
            | Error::Database(_)
            | Error::Io(_)
            | Error::EnvVar(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            // Driver diagnostics go to the log, not the client.
            tracing::error!(error = %err, "internal server error");
            Self {
                status,
                message: "internal server error".to_string(),
            }
        } else {
            Self {
                status,
                message: err.to_string(),
            }
        }
    }
}
