use axum_helpers::extractors::coerce;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Attendees returned per page by the listing endpoint.
pub const ATTENDEES_PAGE_SIZE: u64 = 10;

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub details: Option<String>,
    /// `None` means unlimited.
    pub maximum_attendees: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Row to insert into `events`; the id and timestamp are assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub slug: String,
    pub details: Option<String>,
    pub maximum_attendees: Option<i32>,
}

/// An event with its live attendee count.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub event: Event,
    pub attendees_amount: u64,
}

impl EventDetails {
    /// True when a cap is set and already reached. A negative cap counts as full.
    pub fn is_full(&self) -> bool {
        match self.event.maximum_attendees {
            Some(cap) => u64::try_from(cap).map_or(true, |cap| self.attendees_amount >= cap),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendee {
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub id: i32,
    pub attendee_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Attendee joined with the title of its event.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeBadge {
    pub name: String,
    pub email: String,
    pub event_title: String,
}

/// One page of an event's attendees.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeFilter {
    pub event_id: Uuid,
    /// Case-sensitive substring of the attendee name.
    pub query: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /events`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Required"))]
    #[schema(example = "Unite Summit", min_length = 1)]
    pub title: String,

    #[schema(example = "An event for developers passionate about code")]
    pub details: Option<String>,

    #[validate(range(min = 0, message = "Number must be greater than or equal to 0"))]
    #[schema(example = 120, minimum = 0)]
    pub maximum_attendees: Option<i32>,
}

/// Body of `POST /events/{eventId}/attendees`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendee {
    #[validate(length(min = 4, message = "String must contain at least 4 character(s)"))]
    #[schema(example = "Ada Lovelace", min_length = 4)]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    #[schema(example = "ada@example.com", format = "email")]
    pub email: String,
}

/// Query string of `GET /events/{eventId}/attendees`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAttendeesQuery {
    /// Only attendees whose name contains this text
    pub query: Option<String>,

    /// Zero-based page number; pages hold 10 attendees
    #[serde(default, deserialize_with = "coerce::optional_i64")]
    #[validate(range(min = 0, message = "Number must be greater than or equal to 0"))]
    #[param(value_type = Option<i64>, minimum = 0, default = 0)]
    pub page_index: Option<i64>,
}

impl ListAttendeesQuery {
    /// Pages past the last representable offset clamp to `i64::MAX` and come back empty.
    pub fn into_filter(self, event_id: Uuid) -> AttendeeFilter {
        let page = self.page_index.unwrap_or(0).max(0);
        let offset = page.saturating_mul(ATTENDEES_PAGE_SIZE as i64);

        AttendeeFilter {
            event_id,
            query: self.query,
            limit: ATTENDEES_PAGE_SIZE,
            offset: offset as u64,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    pub event_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event: EventView,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub details: Option<String>,
    pub maximum_attendees: Option<i32>,
    pub attendees_amount: u64,
}

impl From<EventDetails> for EventView {
    fn from(details: EventDetails) -> Self {
        let EventDetails {
            event,
            attendees_amount,
        } = details;

        Self {
            id: event.id,
            title: event.title,
            slug: event.slug,
            details: event.details,
            maximum_attendees: event.maximum_attendees,
            attendees_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendeeResponse {
    pub attendee_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BadgeResponse {
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    pub email: String,
    pub event_title: String,
    /// Absolute URL of the attendee's check-in endpoint
    #[serde(rename = "checkInURL")]
    #[schema(example = "http://localhost:3333/attendees/1/check-in")]
    pub check_in_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendeesResponse {
    pub attendees: Vec<EventAttendee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckInResponse {
    pub success: bool,
}
