//! HTTP handlers for the users API

use crate::error::UserError;
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;
use crate::service::UserService;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum_helpers::extract::Json;
use std::sync::Arc;
use tracing::instrument;

pub type UsersState<R> = Arc<UserService<R>>;

/// Confirmation body for deletes
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

pub fn users_router<R: UserRepository + 'static>() -> Router<UsersState<R>> {
    Router::new()
        .route("/", get(list_users::<R>).post(create_user::<R>))
        .route(
            "/{id}",
            get(get_user::<R>)
                .patch(update_user::<R>)
                .delete(delete_user::<R>),
        )
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, description = "Internal error")
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn list_users<R: UserRepository>(
    State(state): State<UsersState<R>>,
) -> Result<Json<Vec<User>>, UserError> {
    let users = state.list().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "User id (24 hex characters)")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn get_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<String>,
) -> Result<Json<User>, UserError> {
    let user = state.get(&id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 500, description = "Internal error")
    ),
    tag = "users"
)]
#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn create_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Json(input): Json<CreateUser>,
) -> Result<impl IntoResponse, UserError> {
    let user = state.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    params(("id" = String, Path, description = "User id (24 hex characters)")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Malformed id or validation error"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
#[instrument(skip(state, input))]
pub async fn update_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, UserError> {
    let user = state.update(&id, input).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "User id (24 hex characters)")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn delete_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, UserError> {
    state.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::UserDocument;
    use crate::repository::mock::MockUsers;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;
    use tower::ServiceExt;

    const KNOWN_ID: &str = "507f1f77bcf86cd799439011";

    fn app(repo: MockUsers) -> Router {
        let state = Arc::new(UserService::new(repo));
        users_router::<MockUsers>().with_state(state)
    }

    async fn json_body(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_user_returns_201() {
        let mut repo = MockUsers::new();
        repo.expect_create()
            .returning(|document: UserDocument| Ok(document.into()));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Ada", "email": "ada@example.com" }).to_string(),
            ))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["id"].as_str().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_create_user_bad_email_returns_400() {
        let mut repo = MockUsers::new();
        repo.expect_create().never();

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Ada", "email": "nope" }).to_string(),
            ))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(body["errors"][0], "Please add a valid email");
    }

    #[tokio::test]
    async fn test_create_user_missing_email_returns_400_envelope() {
        let mut repo = MockUsers::new();
        repo.expect_create().never();

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "name": "Ada" }).to_string()))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Validation Error");
        assert!(
            body["errors"][0]
                .as_str()
                .unwrap()
                .contains("missing field `email`")
        );
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_returns_400() {
        let mut repo = MockUsers::new();
        repo.expect_create()
            .returning(|_| Err(crate::error::UserError::Duplicate));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Ada", "email": "ada@example.com" }).to_string(),
            ))
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Duplicate field value entered");
    }

    #[tokio::test]
    async fn test_get_user_malformed_id_returns_400() {
        let mut repo = MockUsers::new();
        repo.expect_get_by_id().never();

        let request = Request::builder()
            .uri("/not-hex")
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Invalid User ID format!");
    }

    #[tokio::test]
    async fn test_get_user_unknown_id_returns_404() {
        let mut repo = MockUsers::new();
        repo.expect_get_by_id()
            .with(eq(ObjectId::parse_str(KNOWN_ID).unwrap()))
            .returning(|_| Ok(None));

        let request = Request::builder()
            .uri(format!("/{}", KNOWN_ID))
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_delete_user_returns_confirmation() {
        let mut repo = MockUsers::new();
        repo.expect_delete().returning(|_| Ok(true));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", KNOWN_ID))
            .body(Body::empty())
            .unwrap();

        let response = app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "User deleted successfully");
    }
}
