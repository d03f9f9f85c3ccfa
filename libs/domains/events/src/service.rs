//! Service layer: validation, reference checks, orchestration

use crate::entity::{EventChanges, EventDocument, RsvpChanges, RsvpDocument};
use crate::error::{EventError, Result};
use crate::models::{CreateEvent, CreateRsvp, Event, Rsvp, UpdateEvent, UpdateRsvp};
use crate::repository::{EventRepository, RsvpRepository};
use axum_helpers::validation_messages;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::{info, instrument};
use validator::Validate;

fn parse_reference(value: &Option<String>, message: &str) -> Result<Option<ObjectId>> {
    match value {
        Some(raw) => ObjectId::parse_str(raw)
            .map(Some)
            .map_err(|_| EventError::Validation {
                errors: vec![message.to_string()],
            }),
        None => Ok(None),
    }
}

fn parse_references(values: &[String]) -> Result<Vec<ObjectId>> {
    values
        .iter()
        .map(|raw| {
            ObjectId::parse_str(raw).map_err(|_| EventError::Validation {
                errors: vec!["Invalid attendee ID format".to_string()],
            })
        })
        .collect()
}

/// Event operations over a repository
pub struct EventService<R: EventRepository> {
    repository: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn parse_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| EventError::InvalidEventId { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Event>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Event>> {
        self.repository.search(query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Event> {
        let oid = Self::parse_id(id)?;
        self.repository
            .get_by_id(oid)
            .await?
            .ok_or_else(|| EventError::EventNotFound { id: id.to_string() })
    }

    /// Validate input and persist a new event.
    ///
    /// The organizer reference is checked before the field rules so a
    /// malformed value gets its own error, not the validation envelope.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateEvent) -> Result<Event> {
        if let Some(organizer) = &input.organizer {
            if ObjectId::parse_str(organizer).is_err() {
                return Err(EventError::InvalidOrganizerId {
                    id: organizer.clone(),
                });
            }
        }

        input.validate().map_err(|e| EventError::Validation {
            errors: validation_messages(&e),
        })?;

        let now = Utc::now();
        let document = EventDocument {
            id: ObjectId::new(),
            title: input.title,
            description: input.description,
            date: input.date,
            location: input.location,
            company: parse_reference(&input.company, "Invalid company ID format")?,
            organizer: parse_reference(&input.organizer, "Invalid organizer ID format")?,
            attendees: parse_references(&input.attendees)?,
            created_at: now,
            updated_at: now,
        };

        let event = self.repository.create(document).await?;
        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// Re-validate only the supplied fields, then apply the partial update.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateEvent) -> Result<Event> {
        let oid = Self::parse_id(id)?;

        input.validate().map_err(|e| EventError::Validation {
            errors: validation_messages(&e),
        })?;

        let changes = EventChanges {
            title: input.title,
            description: input.description,
            date: input.date,
            location: input.location,
            company: parse_reference(&input.company, "Invalid company ID format")?,
            organizer: parse_reference(&input.organizer, "Invalid organizer ID format")?,
            attendees: input.attendees.as_deref().map(parse_references).transpose()?,
        };

        self.repository
            .update(oid, changes)
            .await?
            .ok_or_else(|| EventError::EventNotFound { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let oid = Self::parse_id(id)?;
        if self.repository.delete(oid).await? {
            info!(event_id = %id, "Event deleted");
            Ok(())
        } else {
            Err(EventError::EventNotFound { id: id.to_string() })
        }
    }
}

/// RSVP operations; needs the event repository for the reference check
/// at creation
pub struct RsvpService<R: RsvpRepository, E: EventRepository> {
    rsvps: R,
    events: E,
}

impl<R: RsvpRepository, E: EventRepository> RsvpService<R, E> {
    pub fn new(rsvps: R, events: E) -> Self {
        Self { rsvps, events }
    }

    fn parse_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| EventError::InvalidRsvpId { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Rsvp>> {
        self.rsvps.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Rsvp> {
        let oid = Self::parse_id(id)?;
        self.rsvps
            .get_by_id(oid)
            .await?
            .ok_or_else(|| EventError::RsvpNotFound { id: id.to_string() })
    }

    /// Validate input, confirm the referenced event exists, persist.
    ///
    /// The existence check and the insert are separate operations; the
    /// event can be deleted in between.
    #[instrument(skip(self, input), fields(event_id = %input.event))]
    pub async fn create(&self, input: CreateRsvp) -> Result<Rsvp> {
        input.validate().map_err(|e| EventError::Validation {
            errors: validation_messages(&e),
        })?;

        // A malformed id cannot resolve to an event either
        let event_id = ObjectId::parse_str(&input.event).map_err(|_| {
            EventError::EventReferenceNotFound {
                id: input.event.clone(),
            }
        })?;

        if self.events.get_by_id(event_id).await?.is_none() {
            return Err(EventError::EventReferenceNotFound { id: input.event });
        }

        let now = Utc::now();
        let document = RsvpDocument {
            id: ObjectId::new(),
            event: event_id,
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };

        let rsvp = self.rsvps.create(document).await?;
        info!(rsvp_id = %rsvp.id, "RSVP created");
        Ok(rsvp)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateRsvp) -> Result<Rsvp> {
        let oid = Self::parse_id(id)?;

        input.validate().map_err(|e| EventError::Validation {
            errors: validation_messages(&e),
        })?;

        let changes = RsvpChanges {
            event: parse_reference(&input.event, "Invalid event ID format")?,
            name: input.name,
            email: input.email,
        };

        self.rsvps
            .update(oid, changes)
            .await?
            .ok_or_else(|| EventError::RsvpNotFound { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let oid = Self::parse_id(id)?;
        if self.rsvps.delete(oid).await? {
            Ok(())
        } else {
            Err(EventError::RsvpNotFound { id: id.to_string() })
        }
    }
}
