//! Persistence seam for companies

use crate::entity::{CompanyChanges, CompanyDocument};
use crate::error::Result;
use crate::models::Company;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Company>>;
    async fn get_by_id(&self, id: ObjectId) -> Result<Option<Company>>;
    async fn create(&self, document: CompanyDocument) -> Result<Company>;
    async fn update(&self, id: ObjectId, changes: CompanyChanges) -> Result<Option<Company>>;
    async fn delete(&self, id: ObjectId) -> Result<bool>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub Companies {}

        #[async_trait]
        impl CompanyRepository for Companies {
            async fn list(&self) -> Result<Vec<Company>>;
            async fn get_by_id(&self, id: ObjectId) -> Result<Option<Company>>;
            async fn create(&self, document: CompanyDocument) -> Result<Company>;
            async fn update(&self, id: ObjectId, changes: CompanyChanges) -> Result<Option<Company>>;
            async fn delete(&self, id: ObjectId) -> Result<bool>;
        }
    }
}
