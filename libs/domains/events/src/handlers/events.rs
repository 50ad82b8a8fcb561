use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, UuidPath, ValidatedJson,
    errors::responses::{
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
    },
};
use serde_json::json;
use std::sync::Arc;

use super::EVENTS_TAG;
use crate::error::EventResult;
use crate::models::{CreateEvent, CreateEventResponse, EventResponse};
use crate::repository::EventRepository;
use crate::service::EventService;

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = EVENTS_TAG,
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = CreateEventResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;

    AuditEvent::new(
        "event.create",
        Some(format!("event:{}", event.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({
        "slug": event.slug,
        "maximum_attendees": event.maximum_attendees,
    }))
    .log();

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse { event_id: event.id }),
    ))
}

/// Get an event with its attendee count
#[utoipa::path(
    get,
    path = "/events/{eventId}",
    tag = EVENTS_TAG,
    params(
        ("eventId" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(event_id): UuidPath,
) -> EventResult<Json<EventResponse>> {
    let details = service.get_event(event_id).await?;

    Ok(Json(EventResponse {
        event: details.into(),
    }))
}
