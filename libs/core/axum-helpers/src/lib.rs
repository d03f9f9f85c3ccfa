//! Shared axum plumbing: the JSON error envelope, fallback handlers,
//! health endpoint, and server bootstrap with graceful shutdown.

pub mod errors;
pub mod extract;
pub mod health;
pub mod server;
pub mod shutdown;

pub use errors::{AppError, ErrorResponse, handlers::not_found, validation_messages};
pub use health::{HealthResponse, health_router};
pub use server::create_app;
