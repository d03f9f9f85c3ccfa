pub mod handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Uniform error envelope returned by every failing endpoint.
///
/// # JSON Example
///
/// ```json
/// {
///   "message": "Validation Error",
///   "errors": ["Date must be in the future"]
/// }
/// ```
///
/// `errors` is only present for validation failures that carry
/// per-field messages.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Per-field validation messages, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Application error type that converts to HTTP responses.
///
/// Domain error enums map into this closed set; handlers never inspect
/// raw datastore failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Aggregate of per-field validation messages
    #[error("Validation Error")]
    Validation(Vec<String>),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message,
                    errors: None,
                },
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message,
                    errors: None,
                },
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "Validation Error".to_string(),
                    errors: Some(errors),
                },
            ),
            AppError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message,
                        errors: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten `validator::ValidationErrors` into one message per offending
/// field, sorted for deterministic output.
///
/// Fields without an explicit message fall back to "<field> is invalid".
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages
}
