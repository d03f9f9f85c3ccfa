//! MongoDB implementations of the event and RSVP repositories

use crate::entity::{EventChanges, EventDocument, RsvpChanges, RsvpDocument};
use crate::error::Result;
use crate::models::{Event, Rsvp};
use crate::repository::{EventRepository, RsvpRepository};
use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc, to_bson};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};
use std::collections::HashMap;
use tracing::instrument;

fn to_bson_datetime(dt: chrono::DateTime<chrono::Utc>) -> Bson {
    Bson::DateTime(mongodb::bson::DateTime::from_millis(dt.timestamp_millis()))
}

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("events"),
        }
    }

    /// Create the indexes the query patterns rely on
    pub async fn create_indexes(&self) -> Result<()> {
        let indexes = vec![
            // Date index backs the default sort and date-range queries
            IndexModel::builder().keys(doc! { "date": 1 }).build(),
            IndexModel::builder().keys(doc! { "location": 1 }).build(),
            // Text index over title + description
            IndexModel::builder()
                .keys(doc! { "title": "text", "description": "text" })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Build the `$set` document for a partial update.
    ///
    /// `updated_at` is always refreshed.
    fn build_update(changes: EventChanges) -> Result<Document> {
        let mut set = Document::new();

        if let Some(title) = changes.title {
            set.insert("title", title);
        }
        if let Some(description) = changes.description {
            set.insert("description", description);
        }
        if let Some(date) = changes.date {
            set.insert("date", to_bson_datetime(date));
        }
        if let Some(location) = changes.location {
            set.insert("location", location);
        }
        if let Some(company) = changes.company {
            set.insert("company", company);
        }
        if let Some(organizer) = changes.organizer {
            set.insert("organizer", organizer);
        }
        if let Some(attendees) = changes.attendees {
            set.insert("attendees", to_bson(&attendees)?);
        }
        set.insert("updated_at", to_bson_datetime(Utc::now()));

        Ok(set)
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Event>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "date": 1 }).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Event>> {
        // Input is escaped, so metacharacters match literally
        let pattern = regex::escape(query);
        let filter = doc! {
            "$or": [
                { "title": { "$regex": &pattern, "$options": "i" } },
                { "location": { "$regex": &pattern, "$options": "i" } },
                { "description": { "$regex": &pattern, "$options": "i" } },
            ]
        };

        let cursor = self.collection.find(filter).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> Result<Option<Event>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self, document), fields(event_id = %document.id))]
    async fn create(&self, document: EventDocument) -> Result<Event> {
        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: EventChanges) -> Result<Option<Event>> {
        let set = Self::build_update(changes)?;
        let document = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

/// MongoDB-based RSVP repository.
///
/// Holds the events collection as well: reads denormalize the referenced
/// event's title onto each RSVP.
#[derive(Clone)]
pub struct MongoRsvpRepository {
    rsvps: Collection<RsvpDocument>,
    events: Collection<EventDocument>,
}

impl MongoRsvpRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            rsvps: database.collection("rsvps"),
            events: database.collection("events"),
        }
    }

    pub async fn create_indexes(&self) -> Result<()> {
        // The event reference backs the title join
        let indexes = vec![IndexModel::builder().keys(doc! { "event": 1 }).build()];
        self.rsvps.create_indexes(indexes).await?;
        Ok(())
    }

    /// Titles for the given event ids; dangling ids are simply absent
    async fn event_titles(&self, ids: &[ObjectId]) -> Result<HashMap<ObjectId, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cursor = self
            .events
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let events: Vec<EventDocument> = cursor.try_collect().await?;
        Ok(events.into_iter().map(|e| (e.id, e.title)).collect())
    }

    async fn expand(&self, document: RsvpDocument) -> Result<Rsvp> {
        let titles = self.event_titles(&[document.event]).await?;
        let title = titles.get(&document.event).cloned();
        Ok(document.into_rsvp(title))
    }
}

#[async_trait]
impl RsvpRepository for MongoRsvpRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Rsvp>> {
        let cursor = self.rsvps.find(doc! {}).await?;
        let documents: Vec<RsvpDocument> = cursor.try_collect().await?;

        let event_ids: Vec<ObjectId> = documents.iter().map(|d| d.event).collect();
        let titles = self.event_titles(&event_ids).await?;

        Ok(documents
            .into_iter()
            .map(|d| {
                let title = titles.get(&d.event).cloned();
                d.into_rsvp(title)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> Result<Option<Rsvp>> {
        match self.rsvps.find_one(doc! { "_id": id }).await? {
            Some(document) => Ok(Some(self.expand(document).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, document), fields(rsvp_id = %document.id))]
    async fn create(&self, document: RsvpDocument) -> Result<Rsvp> {
        self.rsvps.insert_one(&document).await?;
        self.expand(document).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: RsvpChanges) -> Result<Option<Rsvp>> {
        let mut set = Document::new();
        if let Some(event) = changes.event {
            set.insert("event", event);
        }
        if let Some(name) = changes.name {
            set.insert("name", name);
        }
        if let Some(email) = changes.email {
            set.insert("email", email);
        }
        set.insert("updated_at", to_bson_datetime(Utc::now()));

        let document = self
            .rsvps
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        match document {
            Some(document) => Ok(Some(self.expand(document).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> Result<bool> {
        let result = self.rsvps.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
