//! Service layer for companies

use crate::entity::{CompanyChanges, CompanyDocument};
use crate::error::{CompanyError, Result};
use crate::models::{Company, CreateCompany, UpdateCompany};
use crate::repository::CompanyRepository;
use axum_helpers::validation_messages;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::{info, instrument};
use validator::Validate;

pub struct CompanyService<R: CompanyRepository> {
    repository: R,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn parse_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| CompanyError::InvalidCompanyId { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Company>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Company> {
        let oid = Self::parse_id(id)?;
        self.repository
            .get_by_id(oid)
            .await?
            .ok_or_else(|| CompanyError::CompanyNotFound { id: id.to_string() })
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateCompany) -> Result<Company> {
        input.validate().map_err(|e| CompanyError::Validation {
            errors: validation_messages(&e),
        })?;

        let now = Utc::now();
        let document = CompanyDocument {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            location: input.location,
            website: input.website,
            created_at: now,
            updated_at: now,
        };

        let company = self.repository.create(document).await?;
        info!(company_id = %company.id, "Company created");
        Ok(company)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateCompany) -> Result<Company> {
        let oid = Self::parse_id(id)?;

        input.validate().map_err(|e| CompanyError::Validation {
            errors: validation_messages(&e),
        })?;

        let changes = CompanyChanges {
            name: input.name,
            description: input.description,
            location: input.location,
            website: input.website,
        };

        self.repository
            .update(oid, changes)
            .await?
            .ok_or_else(|| CompanyError::CompanyNotFound { id: id.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let oid = Self::parse_id(id)?;
        if self.repository.delete(oid).await? {
            info!(company_id = %id, "Company deleted");
            Ok(())
        } else {
            Err(CompanyError::CompanyNotFound { id: id.to_string() })
        }
    }
}
