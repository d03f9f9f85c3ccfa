//! Users Domain
//!
//! Plain CRUD over users. Emails carry a unique index; the duplicate-key
//! write maps to a 400 rather than a driver error.

use utoipa::OpenApi;

mod error;
mod handlers;
mod mongodb;
mod repository;
mod service;

pub mod entity;
pub mod models;

pub use error::{Result, UserError};
pub use handlers::{UsersState, users_router};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;

/// OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(
        models::User,
        models::CreateUser,
        models::UpdateUser,
        handlers::MessageResponse,
    )),
    tags(
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;
