//! API models and field rules for companies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Company as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Company {
    pub id: String,

    /// Unique across companies
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating companies
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompany {
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    pub description: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

/// DTO for partial company updates
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompany {
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}
