//! Companies Domain
//!
//! CRUD over companies. Names carry a unique index; only `name` is
//! required, the descriptive fields are optional.

use utoipa::OpenApi;

mod error;
mod handlers;
mod mongodb;
mod repository;
mod service;

pub mod entity;
pub mod models;

pub use error::{CompanyError, Result};
pub use handlers::{CompaniesState, companies_router};
pub use mongodb::MongoCompanyRepository;
pub use repository::CompanyRepository;
pub use service::CompanyService;

/// OpenAPI documentation for the companies API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_companies,
        handlers::get_company,
        handlers::create_company,
        handlers::update_company,
        handlers::delete_company,
    ),
    components(schemas(
        models::Company,
        models::CreateCompany,
        models::UpdateCompany,
        handlers::MessageResponse,
    )),
    tags(
        (name = "companies", description = "Company management")
    )
)]
pub struct ApiDoc;
