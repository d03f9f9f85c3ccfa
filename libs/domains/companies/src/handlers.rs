//! HTTP handlers for the companies API

use crate::error::CompanyError;
use crate::models::{Company, CreateCompany, UpdateCompany};
use crate::repository::CompanyRepository;
use crate::service::CompanyService;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum_helpers::extract::Json;
use std::sync::Arc;
use tracing::instrument;

pub type CompaniesState<R> = Arc<CompanyService<R>>;

/// Confirmation body for deletes
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

pub fn companies_router<R: CompanyRepository + 'static>() -> Router<CompaniesState<R>> {
    Router::new()
        .route("/", get(list_companies::<R>).post(create_company::<R>))
        .route(
            "/{id}",
            get(get_company::<R>)
                .patch(update_company::<R>)
                .delete(delete_company::<R>),
        )
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "List of companies", body = Vec<Company>),
        (status = 500, description = "Internal error")
    ),
    tag = "companies"
)]
#[instrument(skip(state))]
pub async fn list_companies<R: CompanyRepository>(
    State(state): State<CompaniesState<R>>,
) -> Result<Json<Vec<Company>>, CompanyError> {
    let companies = state.list().await?;
    Ok(Json(companies))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Company id (24 hex characters)")),
    responses(
        (status = 200, description = "Company found", body = Company),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Company not found")
    ),
    tag = "companies"
)]
#[instrument(skip(state))]
pub async fn get_company<R: CompanyRepository>(
    State(state): State<CompaniesState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Company>, CompanyError> {
    let company = state.get(&id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 500, description = "Internal error")
    ),
    tag = "companies"
)]
#[instrument(skip(state, input), fields(name = %input.name))]
pub async fn create_company<R: CompanyRepository>(
    State(state): State<CompaniesState<R>>,
    Json(input): Json<CreateCompany>,
) -> Result<impl IntoResponse, CompanyError> {
    let company = state.create(input).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    params(("id" = String, Path, description = "Company id (24 hex characters)")),
    request_body = UpdateCompany,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 400, description = "Malformed id or validation error"),
        (status = 404, description = "Company not found")
    ),
    tag = "companies"
)]
#[instrument(skip(state, input))]
pub async fn update_company<R: CompanyRepository>(
    State(state): State<CompaniesState<R>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCompany>,
) -> Result<Json<Company>, CompanyError> {
    let company = state.update(&id, input).await?;
    Ok(Json(company))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "Company id (24 hex characters)")),
    responses(
        (status = 200, description = "Company deleted", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Company not found")
    ),
    tag = "companies"
)]
#[instrument(skip(state))]
pub async fn delete_company<R: CompanyRepository>(
    State(state): State<CompaniesState<R>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CompanyError> {
    state.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Company deleted successfully".to_string(),
    }))
}
