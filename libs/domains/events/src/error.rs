//! Event domain error types

use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Result type for event and RSVP operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Closed set of failures for the event and RSVP resources.
///
/// Handlers match on these instead of inspecting driver errors.
#[derive(Debug, Error)]
pub enum EventError {
    /// Path id does not match the 24-hex-character format
    #[error("Invalid Event ID format!")]
    InvalidEventId { id: String },

    #[error("Invalid RSVP ID format!")]
    InvalidRsvpId { id: String },

    /// Organizer reference supplied at creation is malformed
    #[error("Invalid organizer ID format")]
    InvalidOrganizerId { id: String },

    #[error("Event not found")]
    EventNotFound { id: String },

    #[error("RSVP not found")]
    RsvpNotFound { id: String },

    /// RSVP creation referenced an event that does not resolve
    #[error("Event not found")]
    EventReferenceNotFound { id: String },

    /// Aggregate of per-field validation messages
    #[error("Validation Error")]
    Validation { errors: Vec<String> },

    /// Uniqueness-constraint conflict (E11000)
    #[error("Duplicate field value entered")]
    Duplicate,

    #[error("Database error: {message}")]
    Database {
        message: String,
        source: Option<mongodb::error::Error>,
    },
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return Self::Duplicate;
        }
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Database {
            message: format!("BSON serialization error: {}", err),
            source: None,
        }
    }
}

/// Duplicate-key writes surface as code 11000
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => write_error.code == 11000,
        ErrorKind::Command(ref command_error) => command_error.code == 11000,
        _ => false,
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::InvalidEventId { .. }
            | EventError::InvalidRsvpId { .. }
            | EventError::InvalidOrganizerId { .. }
            | EventError::EventReferenceNotFound { .. }
            | EventError::Duplicate => AppError::BadRequest(err.to_string()),
            EventError::EventNotFound { .. } | EventError::RsvpNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            EventError::Validation { errors } => AppError::Validation(errors),
            EventError::Database { message, .. } => AppError::InternalServerError(message),
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
