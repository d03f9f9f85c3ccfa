use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, extract::State};
use axum_helpers::{create_app, health_router, not_found};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_companies::{CompanyService, MongoCompanyRepository, companies_router};
use domain_events::{
    EventService, MongoEventRepository, MongoRsvpRepository, RsvpService, events_router,
    rsvp_router,
};
use domain_users::{MongoUserRepository, UserService, users_router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

mod config;
mod openapi;

use config::Config;

#[derive(Clone)]
struct ReadyState {
    client: mongodb::Client,
    database: String,
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "API is running" }))
}

/// Readiness: 200 only while MongoDB answers a ping
async fn readiness(State(state): State<ReadyState>) -> impl IntoResponse {
    if database::mongodb::check_health(&state.client, &state.database).await {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB");
    let client = database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = client.database(config.mongodb.database());
    info!(database = %config.mongodb.database(), "Connected to MongoDB");

    let event_repo = MongoEventRepository::new(&db);
    let rsvp_repo = MongoRsvpRepository::new(&db);
    let user_repo = MongoUserRepository::new(&db);
    let company_repo = MongoCompanyRepository::new(&db);

    event_repo.create_indexes().await?;
    rsvp_repo.create_indexes().await?;
    user_repo.create_indexes().await?;
    company_repo.create_indexes().await?;

    let events = Arc::new(EventService::new(event_repo.clone()));
    let rsvps = Arc::new(RsvpService::new(rsvp_repo, event_repo));
    let users = Arc::new(UserService::new(user_repo));
    let companies = Arc::new(CompanyService::new(company_repo));

    let ready_state = ReadyState {
        client: client.clone(),
        database: config.mongodb.database().to_string(),
    };

    let app = Router::new()
        .route("/", get(root))
        .nest("/events", events_router().with_state(events))
        .nest("/rsvp", rsvp_router().with_state(rsvps))
        .nest("/users", users_router().with_state(users))
        .nest("/companies", companies_router().with_state(companies))
        .route("/ready", get(readiness).with_state(ready_state))
        .merge(health_router(env!("CARGO_PKG_VERSION")))
        .merge(
            RapiDoc::with_openapi("/api-docs/openapi.json", openapi::ApiDoc::openapi())
                .path("/rapidoc"),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    create_app(app, &config.server).await?;

    info!("Shutting down: closing MongoDB connection");
    drop(client);

    Ok(())
}
