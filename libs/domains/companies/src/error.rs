//! Company domain error types

use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompanyError>;

/// Closed set of failures for the company resource
#[derive(Debug, Error)]
pub enum CompanyError {
    #[error("Invalid Company ID format!")]
    InvalidCompanyId { id: String },

    #[error("Company not found")]
    CompanyNotFound { id: String },

    #[error("Validation Error")]
    Validation { errors: Vec<String> },

    /// Name already taken (E11000 on the unique index)
    #[error("Duplicate field value entered")]
    Duplicate,

    #[error("Database error: {message}")]
    Database {
        message: String,
        source: Option<mongodb::error::Error>,
    },
}

impl From<mongodb::error::Error> for CompanyError {
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

impl From<CompanyError> for AppError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::InvalidCompanyId { .. } | CompanyError::Duplicate => {
                AppError::BadRequest(err.to_string())
            }
            CompanyError::CompanyNotFound { .. } => AppError::NotFound(err.to_string()),
            CompanyError::Validation { errors } => AppError::Validation(errors),
            CompanyError::Database { message, .. } => AppError::InternalServerError(message),
        }
    }
}

impl axum::response::IntoResponse for CompanyError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_id_is_bad_request() {
        let err = CompanyError::InvalidCompanyId {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Company ID format!");
        assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
    }

    #[test]
    fn test_duplicate_name_is_bad_request() {
        assert!(matches!(
            AppError::from(CompanyError::Duplicate),
            AppError::BadRequest(_)
        ));
    }
}
