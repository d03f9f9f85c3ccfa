//! HTTP handlers for the events and RSVP APIs

use crate::error::EventError;
use crate::models::{CreateEvent, CreateRsvp, Event, Rsvp, SearchQuery, UpdateEvent, UpdateRsvp};
use crate::repository::{EventRepository, RsvpRepository};
use crate::service::{EventService, RsvpService};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum_helpers::extract::{Json, Query};
use std::sync::Arc;
use tracing::instrument;

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// RSVP router state
pub type RsvpState<R, E> = Arc<RsvpService<R, E>>;

/// Confirmation body for deletes
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create/update responses wrap the RSVP with a confirmation message
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct RsvpEnvelope {
    pub message: String,
    pub rsvp: Rsvp,
}

/// Create the events router
pub fn events_router<R: EventRepository + 'static>() -> Router<EventsState<R>> {
    Router::new()
        .route("/", get(list_events::<R>).post(create_event::<R>))
        .route("/search", get(search_events::<R>))
        .route(
            "/{id}",
            get(get_event::<R>)
                .patch(update_event::<R>)
                .delete(delete_event::<R>),
        )
}

/// Create the RSVP router
pub fn rsvp_router<R, E>() -> Router<RsvpState<R, E>>
where
    R: RsvpRepository + 'static,
    E: EventRepository + 'static,
{
    Router::new()
        .route("/", get(list_rsvps::<R, E>).post(create_rsvp::<R, E>))
        .route(
            "/{id}",
            get(get_rsvp::<R, E>)
                .patch(update_rsvp::<R, E>)
                .delete(delete_rsvp::<R, E>),
        )
}

/// List all events, sorted by date
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "List of events sorted by date", body = Vec<Event>),
        (status = 500, description = "Internal error")
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
) -> Result<Json<Vec<Event>>, EventError> {
    let events = state.list().await?;
    Ok(Json(events))
}

/// Search events by title, location or description substring
#[utoipa::path(
    get,
    path = "/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching events", body = Vec<Event>),
        (status = 500, description = "Internal error")
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn search_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Event>>, EventError> {
    let events = state.search(&params.query).await?;
    Ok(Json(events))
}

/// Get event by id
#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Event id (24 hex characters)")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn get_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Event>, EventError> {
    let event = state.get(&id).await?;
    Ok(Json(event))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation error or duplicate field"),
        (status = 500, description = "Internal error")
    ),
    tag = "events"
)]
#[instrument(skip(state, input), fields(title = %input.title))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Json(input): Json<CreateEvent>,
) -> Result<impl IntoResponse, EventError> {
    let event = state.create(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Partially update an event
#[utoipa::path(
    patch,
    path = "/{id}",
    params(("id" = String, Path, description = "Event id (24 hex characters)")),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Malformed id or validation error"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
#[instrument(skip(state, input))]
pub async fn update_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateEvent>,
) -> Result<Json<Event>, EventError> {
    let event = state.update(&id, input).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "Event id (24 hex characters)")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn delete_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, EventError> {
    state.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Event deleted successfully".to_string(),
    }))
}

/// List all RSVPs with the referenced event's title expanded
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "List of RSVPs", body = Vec<Rsvp>),
        (status = 500, description = "Internal error")
    ),
    tag = "rsvp"
)]
#[instrument(skip(state))]
pub async fn list_rsvps<R: RsvpRepository, E: EventRepository>(
    State(state): State<RsvpState<R, E>>,
) -> Result<Json<Vec<Rsvp>>, EventError> {
    let rsvps = state.list().await?;
    Ok(Json(rsvps))
}

/// Get RSVP by id
#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "RSVP id (24 hex characters)")),
    responses(
        (status = 200, description = "RSVP found", body = Rsvp),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "RSVP not found")
    ),
    tag = "rsvp"
)]
#[instrument(skip(state))]
pub async fn get_rsvp<R: RsvpRepository, E: EventRepository>(
    State(state): State<RsvpState<R, E>>,
    Path(id): Path<String>,
) -> Result<Json<Rsvp>, EventError> {
    let rsvp = state.get(&id).await?;
    Ok(Json(rsvp))
}

/// Create an RSVP for an existing event
#[utoipa::path(
    post,
    path = "/",
    request_body = CreateRsvp,
    responses(
        (status = 201, description = "RSVP created", body = RsvpEnvelope),
        (status = 400, description = "Referenced event not found or validation error"),
        (status = 500, description = "Internal error")
    ),
    tag = "rsvp"
)]
#[instrument(skip(state, input), fields(event_id = %input.event))]
pub async fn create_rsvp<R: RsvpRepository, E: EventRepository>(
    State(state): State<RsvpState<R, E>>,
    Json(input): Json<CreateRsvp>,
) -> Result<impl IntoResponse, EventError> {
    let rsvp = state.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RsvpEnvelope {
            message: "RSVP created successfully".to_string(),
            rsvp,
        }),
    ))
}

/// Partially update an RSVP
#[utoipa::path(
    patch,
    path = "/{id}",
    params(("id" = String, Path, description = "RSVP id (24 hex characters)")),
    request_body = UpdateRsvp,
    responses(
        (status = 200, description = "RSVP updated", body = RsvpEnvelope),
        (status = 400, description = "Malformed id or validation error"),
        (status = 404, description = "RSVP not found")
    ),
    tag = "rsvp"
)]
#[instrument(skip(state, input))]
pub async fn update_rsvp<R: RsvpRepository, E: EventRepository>(
    State(state): State<RsvpState<R, E>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateRsvp>,
) -> Result<Json<RsvpEnvelope>, EventError> {
    let rsvp = state.update(&id, input).await?;
    Ok(Json(RsvpEnvelope {
        message: "RSVP updated successfully".to_string(),
        rsvp,
    }))
}

/// Delete an RSVP
#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "RSVP id (24 hex characters)")),
    responses(
        (status = 200, description = "RSVP deleted", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "RSVP not found")
    ),
    tag = "rsvp"
)]
#[instrument(skip(state))]
pub async fn delete_rsvp<R: RsvpRepository, E: EventRepository>(
    State(state): State<RsvpState<R, E>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, EventError> {
    state.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "RSVP deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EventDocument, RsvpDocument};
    use crate::repository::mock::{MockEvents, MockRsvps};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{DateTime, Duration, Utc};
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;
    use tower::ServiceExt;

    const KNOWN_ID: &str = "507f1f77bcf86cd799439011";

    fn events_app(repo: MockEvents) -> Router {
        let state = Arc::new(EventService::new(repo));
        events_router::<MockEvents>().with_state(state)
    }

    fn rsvp_app(rsvps: MockRsvps, events: MockEvents) -> Router {
        let state = Arc::new(RsvpService::new(rsvps, events));
        rsvp_router::<MockRsvps, MockEvents>().with_state(state)
    }

    async fn json_body(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    fn sample_event() -> Event {
        EventDocument {
            id: ObjectId::parse_str(KNOWN_ID).unwrap(),
            title: "Launch".to_string(),
            description: "Product launch event".to_string(),
            date: Utc::now() + Duration::days(1),
            location: "HQ".to_string(),
            company: None,
            organizer: None,
            attendees: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
        .into()
    }

    #[tokio::test]
    async fn test_create_event_returns_201_with_matching_fields() {
        let mut repo = MockEvents::new();
        repo.expect_create()
            .returning(|document: EventDocument| Ok(document.into()));

        let date = Utc::now() + Duration::days(1);
        let request = json_request(
            "POST",
            "/",
            json!({
                "title": "Launch",
                "description": "Product launch event",
                "date": date.to_rfc3339(),
                "location": "HQ"
            }),
        );

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["title"], "Launch");
        assert_eq!(body["location"], "HQ");

        let id = body["id"].as_str().unwrap();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let returned: DateTime<Utc> = body["date"].as_str().unwrap().parse().unwrap();
        assert_eq!(returned, date);
    }

    #[tokio::test]
    async fn test_create_event_past_date_returns_400() {
        let mut repo = MockEvents::new();
        repo.expect_create().never();

        let request = json_request(
            "POST",
            "/",
            json!({
                "title": "Launch",
                "description": "Product launch event",
                "date": (Utc::now() - Duration::days(1)).to_rfc3339(),
                "location": "HQ"
            }),
        );

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(body["errors"][0], "Date must be in the future");
    }

    #[tokio::test]
    async fn test_create_event_short_description_returns_400() {
        let mut repo = MockEvents::new();
        repo.expect_create().never();

        let request = json_request(
            "POST",
            "/",
            json!({
                "title": "Launch",
                "description": "too short",
                "date": (Utc::now() + Duration::days(1)).to_rfc3339(),
                "location": "HQ"
            }),
        );

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["errors"][0], "Description must be at least 10 characters");
    }

    #[tokio::test]
    async fn test_create_event_missing_title_returns_400_envelope() {
        let mut repo = MockEvents::new();
        repo.expect_create().never();

        let request = json_request(
            "POST",
            "/",
            json!({
                "description": "Product launch event",
                "date": (Utc::now() + Duration::days(1)).to_rfc3339(),
                "location": "HQ"
            }),
        );

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Validation Error");
        assert!(
            body["errors"][0]
                .as_str()
                .unwrap()
                .contains("missing field `title`")
        );
    }

    #[tokio::test]
    async fn test_search_without_query_param_returns_400() {
        let mut repo = MockEvents::new();
        repo.expect_search().never();

        let request = Request::builder()
            .uri("/search")
            .body(Body::empty())
            .unwrap();

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_create_event_invalid_organizer_returns_400() {
        let mut repo = MockEvents::new();
        repo.expect_create().never();

        let request = json_request(
            "POST",
            "/",
            json!({
                "title": "Launch",
                "description": "Product launch event",
                "date": (Utc::now() + Duration::days(1)).to_rfc3339(),
                "location": "HQ",
                "organizer": "not-a-valid-id"
            }),
        );

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Invalid organizer ID format");
    }

    #[tokio::test]
    async fn test_create_event_duplicate_returns_400() {
        let mut repo = MockEvents::new();
        repo.expect_create()
            .returning(|_| Err(crate::error::EventError::Duplicate));

        let request = json_request(
            "POST",
            "/",
            json!({
                "title": "Launch",
                "description": "Product launch event",
                "date": (Utc::now() + Duration::days(1)).to_rfc3339(),
                "location": "HQ"
            }),
        );

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Duplicate field value entered");
    }

    #[tokio::test]
    async fn test_get_event_malformed_id_returns_400_not_404() {
        let mut repo = MockEvents::new();
        repo.expect_get_by_id().never();

        let request = Request::builder()
            .uri("/not-hex")
            .body(Body::empty())
            .unwrap();

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Invalid Event ID format!");
    }

    #[tokio::test]
    async fn test_get_event_unknown_id_returns_404() {
        let mut repo = MockEvents::new();
        repo.expect_get_by_id()
            .with(eq(ObjectId::parse_str(KNOWN_ID).unwrap()))
            .returning(|_| Ok(None));

        let request = Request::builder()
            .uri(format!("/{}", KNOWN_ID))
            .body(Body::empty())
            .unwrap();

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Event not found");
    }

    #[tokio::test]
    async fn test_delete_event_returns_confirmation() {
        let mut repo = MockEvents::new();
        repo.expect_delete().returning(|_| Ok(true));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", KNOWN_ID))
            .body(Body::empty())
            .unwrap();

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Event deleted successfully");
    }

    #[tokio::test]
    async fn test_delete_already_deleted_event_returns_404() {
        let mut repo = MockEvents::new();
        repo.expect_delete().returning(|_| Ok(false));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", KNOWN_ID))
            .body(Body::empty())
            .unwrap();

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_event_returns_updated_document() {
        let mut repo = MockEvents::new();
        repo.expect_update().returning(|_, changes| {
            let mut event = sample_event();
            if let Some(location) = changes.location {
                event.location = location;
            }
            Ok(Some(event))
        });

        let request = json_request(
            "PATCH",
            &format!("/{}", KNOWN_ID),
            json!({ "location": "Downtown" }),
        );

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["location"], "Downtown");
    }

    #[tokio::test]
    async fn test_search_events_returns_matches() {
        let mut repo = MockEvents::new();
        repo.expect_search()
            .with(eq("launch"))
            .returning(|_| Ok(vec![sample_event()]));

        let request = Request::builder()
            .uri("/search?query=launch")
            .body(Body::empty())
            .unwrap();

        let response = events_app(repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Launch");
    }

    #[tokio::test]
    async fn test_create_rsvp_unknown_event_returns_400() {
        let mut events = MockEvents::new();
        events.expect_get_by_id().returning(|_| Ok(None));
        let mut rsvps = MockRsvps::new();
        rsvps.expect_create().never();

        let request = json_request(
            "POST",
            "/",
            json!({
                "event": KNOWN_ID,
                "name": "Ada",
                "email": "ada@example.com"
            }),
        );

        let response = rsvp_app(rsvps, events).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Event not found");
    }

    #[tokio::test]
    async fn test_create_rsvp_malformed_event_id_returns_400() {
        let mut events = MockEvents::new();
        events.expect_get_by_id().never();
        let rsvps = MockRsvps::new();

        let request = json_request(
            "POST",
            "/",
            json!({
                "event": "not-an-id",
                "name": "Ada",
                "email": "ada@example.com"
            }),
        );

        let response = rsvp_app(rsvps, events).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Event not found");
    }

    #[tokio::test]
    async fn test_create_rsvp_returns_201_envelope() {
        let mut events = MockEvents::new();
        events
            .expect_get_by_id()
            .with(eq(ObjectId::parse_str(KNOWN_ID).unwrap()))
            .returning(|_| Ok(Some(sample_event())));

        let mut rsvps = MockRsvps::new();
        rsvps.expect_create().returning(|document: RsvpDocument| {
            Ok(document.into_rsvp(Some("Launch".to_string())))
        });

        let request = json_request(
            "POST",
            "/",
            json!({
                "event": KNOWN_ID,
                "name": "Ada",
                "email": "ada@example.com"
            }),
        );

        let response = rsvp_app(rsvps, events).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "RSVP created successfully");
        assert_eq!(body["rsvp"]["name"], "Ada");
        assert_eq!(body["rsvp"]["event"]["title"], "Launch");
    }

    #[tokio::test]
    async fn test_list_rsvps_expands_event_titles() {
        let mut rsvps = MockRsvps::new();
        rsvps.expect_list().returning(|| {
            let document = RsvpDocument {
                id: ObjectId::new(),
                event: ObjectId::parse_str(KNOWN_ID).unwrap(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            Ok(vec![document.into_rsvp(Some("Launch".to_string()))])
        });

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = rsvp_app(rsvps, MockEvents::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body[0]["event"]["title"], "Launch");
        assert_eq!(body[0]["event"]["id"], KNOWN_ID);
    }

    #[tokio::test]
    async fn test_delete_rsvp_malformed_id_returns_400() {
        let rsvps = MockRsvps::new();

        let request = Request::builder()
            .method("DELETE")
            .uri("/xyz")
            .body(Body::empty())
            .unwrap();

        let response = rsvp_app(rsvps, MockEvents::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Invalid RSVP ID format!");
    }
}
