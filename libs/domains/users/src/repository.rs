//! Persistence seam for users

use crate::entity::{UserChanges, UserDocument};
use crate::error::Result;
use crate::models::User;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>>;
    async fn get_by_id(&self, id: ObjectId) -> Result<Option<User>>;
    async fn create(&self, document: UserDocument) -> Result<User>;
    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<Option<User>>;
    async fn delete(&self, id: ObjectId) -> Result<bool>;
}
