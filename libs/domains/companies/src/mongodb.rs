//! MongoDB implementation of the company repository

use crate::entity::{CompanyChanges, CompanyDocument};
use crate::error::Result;
use crate::models::Company;
use crate::repository::CompanyRepository;
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
pub struct MongoCompanyRepository {
    collection: Collection<CompanyDocument>,
}

impl MongoCompanyRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("companies"),
        }
    }

    /// Unique index on name; duplicate inserts fail with E11000
    pub async fn create_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for MongoCompanyRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Company>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<CompanyDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> Result<Option<Company>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self, document), fields(company_id = %document.id))]
    async fn create(&self, document: CompanyDocument) -> Result<Company> {
        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: CompanyChanges) -> Result<Option<Company>> {
        let mut set = Document::new();
        if let Some(name) = changes.name {
            set.insert("name", name);
        }
        if let Some(description) = changes.description {
            set.insert("description", description);
        }
        if let Some(location) = changes.location {
            set.insert("location", location);
        }
        if let Some(website) = changes.website {
            set.insert("website", website);
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
