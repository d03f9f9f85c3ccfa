//! API models and field rules for events and RSVPs

use crate::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Event as returned by the API.
///
/// `id` and the reference fields are 24-hex-character ObjectId strings;
/// dates are RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,

    /// Event title
    pub title: String,

    /// Event description, at least 10 characters
    pub description: String,

    /// When the event takes place; strictly in the future at creation
    pub date: DateTime<Utc>,

    pub location: String,

    /// Optional reference to the hosting company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Optional reference to the organizing user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    /// References to attending users
    #[serde(default)]
    pub attendees: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating events
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Please add a title"))]
    pub title: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    #[validate(custom(function = validation::future_date, message = "Date must be in the future"))]
    pub date: DateTime<Utc>,

    #[validate(length(min = 1, message = "Please add a location"))]
    pub location: String,

    #[validate(custom(function = validation::object_id, message = "Invalid company ID format"))]
    pub company: Option<String>,

    /// Checked separately before the field rules so a bad value gets its
    /// own response message rather than the validation envelope.
    pub organizer: Option<String>,

    #[serde(default)]
    #[validate(custom(function = validation::object_id_list, message = "Invalid attendee ID format"))]
    pub attendees: Vec<String>,
}

/// DTO for partial event updates; only supplied fields are re-validated
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "Please add a title"))]
    pub title: Option<String>,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = validation::future_date, message = "Date must be in the future"))]
    pub date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, message = "Please add a location"))]
    pub location: Option<String>,

    #[validate(custom(function = validation::object_id, message = "Invalid company ID format"))]
    pub company: Option<String>,

    #[validate(custom(function = validation::object_id, message = "Invalid organizer ID format"))]
    pub organizer: Option<String>,

    #[validate(custom(function = validation::object_id_list, message = "Invalid attendee ID format"))]
    pub attendees: Option<Vec<String>>,
}

/// Query string for event search
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against title, location and
    /// description
    pub query: String,
}

/// The referenced event, denormalized onto RSVP reads for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
}

/// RSVP as returned by the API.
///
/// `event` is `null` when the referenced event no longer exists
/// (deletion does not cascade).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Rsvp {
    pub id: String,

    pub event: Option<EventSummary>,

    /// Attendee name
    pub name: String,

    /// Attendee email
    pub email: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating RSVPs
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRsvp {
    /// Id of the event being attended; must resolve to an existing event
    pub event: String,

    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    #[validate(email(message = "Please add a valid email"))]
    pub email: String,
}

/// DTO for partial RSVP updates.
///
/// A supplied `event` id is re-checked for format only; existence is
/// enforced at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRsvp {
    #[validate(custom(function = validation::object_id, message = "Invalid event ID format"))]
    pub event: Option<String>,

    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,

    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_create() -> CreateEvent {
        CreateEvent {
            title: "Launch".to_string(),
            description: "Product launch event".to_string(),
            date: Utc::now() + Duration::days(1),
            location: "HQ".to_string(),
            company: None,
            organizer: None,
            attendees: vec![],
        }
    }

    #[test]
    fn test_valid_event_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_past_date_rejected() {
        let mut input = valid_create();
        input.date = Utc::now() - Duration::days(1);
        let errors = input.validate().unwrap_err();
        let messages = axum_helpers::validation_messages(&errors);
        assert_eq!(messages, vec!["Date must be in the future".to_string()]);
    }

    #[test]
    fn test_short_description_rejected() {
        let mut input = valid_create();
        input.description = "too short".to_string(); // 9 characters
        let errors = input.validate().unwrap_err();
        let messages = axum_helpers::validation_messages(&errors);
        assert_eq!(
            messages,
            vec!["Description must be at least 10 characters".to_string()]
        );
    }

    #[test]
    fn test_missing_title_and_location_collects_both() {
        let mut input = valid_create();
        input.title = String::new();
        input.location = String::new();
        let errors = input.validate().unwrap_err();
        let messages = axum_helpers::validation_messages(&errors);
        assert_eq!(
            messages,
            vec![
                "Please add a location".to_string(),
                "Please add a title".to_string(),
            ]
        );
    }

    #[test]
    fn test_bad_company_id_rejected() {
        let mut input = valid_create();
        input.company = Some("not-an-object-id".to_string());
        let errors = input.validate().unwrap_err();
        let messages = axum_helpers::validation_messages(&errors);
        assert_eq!(messages, vec!["Invalid company ID format".to_string()]);
    }

    #[test]
    fn test_update_validates_only_supplied_fields() {
        let update = UpdateEvent {
            location: Some("Downtown".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = UpdateEvent {
            date: Some(Utc::now() - Duration::hours(1)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_rsvp_email_rule() {
        let input = CreateRsvp {
            event: "507f1f77bcf86cd799439011".to_string(),
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
        };
        let errors = input.validate().unwrap_err();
        let messages = axum_helpers::validation_messages(&errors);
        assert_eq!(messages, vec!["Please add a valid email".to_string()]);
    }
}
