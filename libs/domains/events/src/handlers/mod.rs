//! HTTP endpoints for events, registration, badges and check-in.

mod attendees;
mod events;

use axum::{
    Router,
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    ConflictResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    AttendeesResponse, Badge, BadgeResponse, CheckInResponse, CreateEvent, CreateEventResponse,
    EventAttendee, EventResponse, EventView, RegisterAttendee, RegisterAttendeeResponse,
};
use crate::repository::EventRepository;
use crate::service::EventService;

pub const EVENTS_TAG: &str = "events";
pub const ATTENDEES_TAG: &str = "attendees";

/// OpenAPI documentation for the pass-in API
#[derive(OpenApi)]
#[openapi(
    paths(
        events::create_event,
        events::get_event,
        attendees::register_attendee,
        attendees::list_event_attendees,
        attendees::get_attendee_badge,
        attendees::check_in_attendee,
    ),
    components(
        schemas(
            CreateEvent,
            CreateEventResponse,
            EventResponse,
            EventView,
            RegisterAttendee,
            RegisterAttendeeResponse,
            AttendeesResponse,
            EventAttendee,
            BadgeResponse,
            Badge,
            CheckInResponse,
        ),
        responses(
            NotFoundResponse,
            ConflictResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = EVENTS_TAG, description = "Event creation and lookup"),
        (name = ATTENDEES_TAG, description = "Registration, badges and check-in")
    )
)]
pub struct ApiDoc;

/// Routes are absolute (`/events`, `/attendees/...`) so the router merges at the root.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/events", post(events::create_event))
        .route("/events/{eventId}", get(events::get_event))
        .route(
            "/events/{eventId}/attendees",
            get(attendees::list_event_attendees).post(attendees::register_attendee),
        )
        .route("/attendees/{attendeeId}/badge", get(attendees::get_attendee_badge))
        .route("/attendees/{attendeeId}/check-in", get(attendees::check_in_attendee))
        .with_state(shared_service)
}
