//! User domain error types

use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UserError>;

/// Closed set of failures for the user resource
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid User ID format!")]
    InvalidUserId { id: String },

    #[error("User not found")]
    UserNotFound { id: String },

    #[error("Validation Error")]
    Validation { errors: Vec<String> },

    /// Email already taken (E11000 on the unique index)
    #[error("Duplicate field value entered")]
    Duplicate,

    #[error("Database error: {message}")]
    Database {
        message: String,
        source: Option<mongodb::error::Error>,
    },
}

impl From<mongodb::error::Error> for UserError {
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

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => write_error.code == 11000,
        ErrorKind::Command(ref command_error) => command_error.code == 11000,
        _ => false,
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId { .. } | UserError::Duplicate => {
                AppError::BadRequest(err.to_string())
            }
            UserError::UserNotFound { .. } => AppError::NotFound(err.to_string()),
            UserError::Validation { errors } => AppError::Validation(errors),
            UserError::Database { message, .. } => AppError::InternalServerError(message),
        }
    }
}

impl axum::response::IntoResponse for UserError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
