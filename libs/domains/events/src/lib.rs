//! Events Domain
//!
//! CRUD over events and their RSVPs, backed by MongoDB:
//! - Events: list (sorted by date), substring search, get, create,
//!   partial update, delete
//! - RSVPs: reference an existing event at creation; reads expand the
//!   referenced event's title for display
//!
//! All field rules live on the API DTOs (`models`), separate from the
//! stored documents (`entity`). Handlers map a closed set of domain
//! errors to the uniform JSON error envelope.

use utoipa::OpenApi;

mod error;
mod handlers;
mod mongodb;
mod repository;
mod service;

pub mod entity;
pub mod models;
pub mod validation;

pub use error::{EventError, Result};
pub use handlers::{EventsState, RsvpState, events_router, rsvp_router};
pub use mongodb::{MongoEventRepository, MongoRsvpRepository};
pub use repository::{EventRepository, RsvpRepository};
pub use service::{EventService, RsvpService};

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_events,
        handlers::search_events,
        handlers::get_event,
        handlers::create_event,
        handlers::update_event,
        handlers::delete_event,
    ),
    components(schemas(
        models::Event,
        models::CreateEvent,
        models::UpdateEvent,
        handlers::MessageResponse,
    )),
    tags(
        (name = "events", description = "Event management")
    )
)]
pub struct EventsApiDoc;

/// OpenAPI documentation for the RSVP API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_rsvps,
        handlers::get_rsvp,
        handlers::create_rsvp,
        handlers::update_rsvp,
        handlers::delete_rsvp,
    ),
    components(schemas(
        models::Rsvp,
        models::EventSummary,
        models::CreateRsvp,
        models::UpdateRsvp,
        handlers::MessageResponse,
        handlers::RsvpEnvelope,
    )),
    tags(
        (name = "rsvp", description = "Event attendance records")
    )
)]
pub struct RsvpApiDoc;
