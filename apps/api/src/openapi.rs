//! Combined OpenAPI documentation for all resources

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = env!("CARGO_PKG_VERSION"),
        description = "REST API for managing events, RSVPs, users and companies"
    ),
    nest(
        (path = "/events", api = domain_events::EventsApiDoc),
        (path = "/rsvp", api = domain_events::RsvpApiDoc),
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/companies", api = domain_companies::ApiDoc)
    ),
    tags(
        (name = "events", description = "Event management"),
        (name = "rsvp", description = "Event attendance records"),
        (name = "users", description = "User management"),
        (name = "companies", description = "Company management")
    )
)]
pub struct ApiDoc;
