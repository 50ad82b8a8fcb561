use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
    },
    request_base_url,
};
use serde_json::json;
use std::sync::Arc;

use super::ATTENDEES_TAG;
use crate::error::EventResult;
use crate::models::{
    AttendeesResponse, BadgeResponse, CheckInResponse, ListAttendeesQuery, RegisterAttendee,
    RegisterAttendeeResponse,
};
use crate::repository::EventRepository;
use crate::service::EventService;

/// Register an attendee for an event
#[utoipa::path(
    post,
    path = "/events/{eventId}/attendees",
    tag = ATTENDEES_TAG,
    params(
        ("eventId" = Uuid, Path, description = "Event ID")
    ),
    request_body = RegisterAttendee,
    responses(
        (status = 201, description = "Attendee registered", body = RegisterAttendeeResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn register_attendee<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    headers: HeaderMap,
    UuidPath(event_id): UuidPath,
    ValidatedJson(input): ValidatedJson<RegisterAttendee>,
) -> EventResult<impl IntoResponse> {
    let attendee = service.register_attendee(event_id, input).await?;

    AuditEvent::new(
        "attendee.register",
        Some(format!("attendee:{}", attendee.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "event_id": event_id }))
    .log();

    Ok((
        StatusCode::CREATED,
        Json(RegisterAttendeeResponse {
            attendee_id: attendee.id,
        }),
    ))
}

/// List an event's attendees, ten per page, newest first
#[utoipa::path(
    get,
    path = "/events/{eventId}/attendees",
    tag = ATTENDEES_TAG,
    params(
        ("eventId" = Uuid, Path, description = "Event ID"),
        ListAttendeesQuery
    ),
    responses(
        (status = 200, description = "Page of attendees", body = AttendeesResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_event_attendees<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(event_id): UuidPath,
    ValidatedQuery(query): ValidatedQuery<ListAttendeesQuery>,
) -> EventResult<Json<AttendeesResponse>> {
    let attendees = service.list_attendees(event_id, query).await?;
    Ok(Json(AttendeesResponse { attendees }))
}

/// Get an attendee's badge
#[utoipa::path(
    get,
    path = "/attendees/{attendeeId}/badge",
    tag = ATTENDEES_TAG,
    params(
        ("attendeeId" = i32, Path, description = "Attendee ID")
    ),
    responses(
        (status = 200, description = "Badge", body = BadgeResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_attendee_badge<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    uri: Uri,
    headers: HeaderMap,
    IdPath(attendee_id): IdPath,
) -> EventResult<Json<BadgeResponse>> {
    let badge = service
        .attendee_badge(attendee_id, &request_base_url(&uri, &headers))
        .await?;

    Ok(Json(BadgeResponse { badge }))
}

/// Check an attendee in
#[utoipa::path(
    get,
    path = "/attendees/{attendeeId}/check-in",
    tag = ATTENDEES_TAG,
    params(
        ("attendeeId" = i32, Path, description = "Attendee ID")
    ),
    responses(
        (status = 201, description = "Checked in", body = CheckInResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn check_in_attendee<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    headers: HeaderMap,
    IdPath(attendee_id): IdPath,
) -> EventResult<impl IntoResponse> {
    let check_in = service.check_in(attendee_id).await?;

    AuditEvent::new(
        "attendee.check_in",
        Some(format!("attendee:{}", attendee_id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "check_in_id": check_in.id }))
    .log();

    Ok((StatusCode::CREATED, Json(CheckInResponse { success: true })))
}
