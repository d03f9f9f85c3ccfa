//! Field rules shared by the event and RSVP DTOs.
//!
//! Kept apart from the stored document types so the rule set is
//! testable without touching the database.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use validator::ValidationError;

/// True if the value matches the 24-hex-character ObjectId format.
pub fn is_object_id(value: &str) -> bool {
    ObjectId::parse_str(value).is_ok()
}

/// Validator: identifier fields must be well-formed ObjectIds.
pub fn object_id(value: &str) -> Result<(), ValidationError> {
    if is_object_id(value) {
        Ok(())
    } else {
        Err(ValidationError::new("object_id"))
    }
}

/// Validator: every entry must be a well-formed ObjectId.
pub fn object_id_list(values: &Vec<String>) -> Result<(), ValidationError> {
    if values.iter().all(|v| is_object_id(v)) {
        Ok(())
    } else {
        Err(ValidationError::new("object_id"))
    }
}

/// Validator: the date must be strictly later than now.
pub fn future_date(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value > Utc::now() {
        Ok(())
    } else {
        Err(ValidationError::new("future_date"))
    }
}
