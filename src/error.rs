//! Application error type and its HTTP representation.
//!
//! Every failure that reaches a handler is one of three kinds. Store failures
//! are translated here, so backend details never cross the HTTP boundary:
//! they are logged and replaced by a generic message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

/// Message returned to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when a creation request carries no usable URL.
pub const URL_REQUIRED_MESSAGE: &str = "URL is required";

/// JSON body of every error response: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad or missing input. The message is shown to the client.
    #[error("{message}")]
    Validation { message: String },

    /// Absent or expired record.
    #[error("{message}")]
    NotFound { message: String },

    /// Store unavailable, retry budget exhausted or entropy failure.
    /// `reason` is for logs only.
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message safe to show to a client.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation { message } | AppError::NotFound { message } => message.clone(),
            AppError::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { reason } = &self {
            tracing::error!("Request failed: {}", reason);
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::internal(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message)
    }
}

/// A body that cannot be read as JSON carries no usable URL, so it gets the
/// same answer as a missing one.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::bad_request(URL_REQUIRED_MESSAGE)
    }
}
