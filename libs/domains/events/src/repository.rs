//! Repository traits for event and RSVP storage

use crate::entity::{EventChanges, EventDocument, RsvpChanges, RsvpDocument};
use crate::error::Result;
use crate::models::{Event, Rsvp};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Storage operations for events
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events, sorted by date ascending
    async fn list(&self) -> Result<Vec<Event>>;

    /// Case-insensitive substring search over title, location and
    /// description
    async fn search(&self, query: &str) -> Result<Vec<Event>>;

    async fn get_by_id(&self, id: ObjectId) -> Result<Option<Event>>;

    async fn create(&self, document: EventDocument) -> Result<Event>;

    /// Apply a partial update; `None` when no event has that id
    async fn update(&self, id: ObjectId, changes: EventChanges) -> Result<Option<Event>>;

    /// True if a document was removed
    async fn delete(&self, id: ObjectId) -> Result<bool>;
}

/// Storage operations for RSVPs.
///
/// Reads expand the referenced event's title for display; stored data is
/// never mutated by the expansion.
#[async_trait]
pub trait RsvpRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Rsvp>>;

    async fn get_by_id(&self, id: ObjectId) -> Result<Option<Rsvp>>;

    async fn create(&self, document: RsvpDocument) -> Result<Rsvp>;

    async fn update(&self, id: ObjectId, changes: RsvpChanges) -> Result<Option<Rsvp>>;

    async fn delete(&self, id: ObjectId) -> Result<bool>;
}
