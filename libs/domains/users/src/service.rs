//! Service layer for users

use crate::entity::{UserChanges, UserDocument};
use crate::error::{Result, UserError};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;
use axum_helpers::validation_messages;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::{info, instrument};
use validator::Validate;

pub struct UserService<R: UserRepository> {
    repository: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn parse_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| UserError::InvalidUserId { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<User> {
        let oid = Self::parse_id(id)?;
        self.repository
            .get_by_id(oid)
            .await?
            .ok_or_else(|| UserError::UserNotFound { id: id.to_string() })
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateUser) -> Result<User> {
        input.validate().map_err(|e| UserError::Validation {
            errors: validation_messages(&e),
        })?;

        let now = Utc::now();
        let document = UserDocument {
            id: ObjectId::new(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.create(document).await?;
        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateUser) -> Result<User> {
        let oid = Self::parse_id(id)?;

        input.validate().map_err(|e| UserError::Validation {
            errors: validation_messages(&e),
        })?;

        let changes = UserChanges {
            name: input.name,
            email: input.email,
        };

        self.repository
            .update(oid, changes)
            .await?
            .ok_or_else(|| UserError::UserNotFound { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let oid = Self::parse_id(id)?;
        if self.repository.delete(oid).await? {
            info!(user_id = %id, "User deleted");
            Ok(())
        } else {
            Err(UserError::UserNotFound { id: id.to_string() })
        }
    }
}
