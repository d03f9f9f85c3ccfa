use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness response for `/health`
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Router exposing `/health` with the given application version.
///
/// Liveness only; readiness checks that touch backends belong to the app.
pub fn health_router(version: impl Into<String>) -> Router {
    let version = version.into();

    Router::new().route(
        "/health",
        get(move || {
            let version = version.clone();
            async move {
                Json(HealthResponse {
                    status: "ok".to_string(),
                    version,
                })
            }
        }),
    )
}
