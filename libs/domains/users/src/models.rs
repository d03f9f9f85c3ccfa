//! API models and field rules for users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,

    pub name: String,

    /// Unique across users
    pub email: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating users
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    #[validate(email(message = "Please add a valid email"))]
    pub email: String,
}

/// DTO for partial user updates
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,

    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_passes() {
        let input = CreateUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_bad_email_rejected() {
        let input = CreateUser {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
        };
        let errors = input.validate().unwrap_err();
        let messages = axum_helpers::validation_messages(&errors);
        assert_eq!(messages, vec!["Please add a valid email".to_string()]);
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = UpdateUser {
            name: Some("Grace".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = UpdateUser {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
