//! Stored document types, separate from the API models.
//!
//! Dates are kept as BSON datetimes so range queries and the date sort
//! compare chronologically, not lexically.

use crate::models::{Event, EventSummary, Rsvp};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Event document in the `events` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub title: String,
    pub description: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,

    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<ObjectId>,

    #[serde(default)]
    pub attendees: Vec<ObjectId>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            date: doc.date,
            location: doc.location,
            company: doc.company.map(|id| id.to_hex()),
            organizer: doc.organizer.map(|id| id.to_hex()),
            attendees: doc.attendees.iter().map(|id| id.to_hex()).collect(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Typed partial update for an event; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub company: Option<ObjectId>,
    pub organizer: Option<ObjectId>,
    pub attendees: Option<Vec<ObjectId>>,
}

/// RSVP document in the `rsvps` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Reference to the attended event; not invalidated when the event
    /// is later deleted
    pub event: ObjectId,

    pub name: String,
    pub email: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl RsvpDocument {
    /// Convert to the API model, expanding the event reference with the
    /// given title (`None` when the reference is dangling).
    pub fn into_rsvp(self, event_title: Option<String>) -> Rsvp {
        Rsvp {
            id: self.id.to_hex(),
            event: event_title.map(|title| EventSummary {
                id: self.event.to_hex(),
                title,
            }),
            name: self.name,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Typed partial update for an RSVP
#[derive(Debug, Clone, Default)]
pub struct RsvpChanges {
    pub event: Option<ObjectId>,
    pub name: Option<String>,
    pub email: Option<String>,
}
