//! MongoDB implementation of the user repository

use crate::entity::{UserChanges, UserDocument};
use crate::error::Result;
use crate::models::User;
use crate::repository::UserRepository;
use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use tracing::instrument;

fn to_bson_datetime(dt: chrono::DateTime<chrono::Utc>) -> Bson {
    Bson::DateTime(mongodb::bson::DateTime::from_millis(dt.timestamp_millis()))
}

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("users"),
        }
    }

    /// Unique index on email; duplicate inserts fail with E11000
    pub async fn create_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self, document), fields(user_id = %document.id))]
    async fn create(&self, document: UserDocument) -> Result<User> {
        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<Option<User>> {
        let mut set = Document::new();
        if let Some(name) = changes.name {
            set.insert("name", name);
        }
        if let Some(email) = changes.email {
            set.insert("email", email);
        }
        set.insert("updated_at", to_bson_datetime(Utc::now()));

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
