use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use strum::IntoStaticStr;
use thiserror::Error;

/// Failures of the events domain.
///
/// The display text of each variant is the message sent to clients.
/// `Into<&'static str>` gives the metrics outcome label.
#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EventError {
    #[error("Event not found")]
    EventNotFound,

    #[error("Attendee not found")]
    AttendeeNotFound,

    #[error("Slug already in use")]
    SlugTaken,

    #[error("This event is full")]
    EventFull,

    #[error("E-mail already registered to this event")]
    #[strum(serialize = "duplicate_email")]
    EmailTaken,

    #[error("Attendee already checked in")]
    AlreadyCheckedIn,

    /// The title has no character a slug can be built from.
    #[error("Title must contain at least one letter or digit")]
    EmptySlug,

    #[error("Database error: {0}")]
    #[strum(serialize = "error")]
    Database(#[from] DbErr),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    pub fn outcome(&self) -> &'static str {
        self.into()
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::EventNotFound | EventError::AttendeeNotFound => {
                AppError::NotFound(err.to_string())
            }
            EventError::SlugTaken
            | EventError::EventFull
            | EventError::EmailTaken
            | EventError::AlreadyCheckedIn => AppError::Conflict(err.to_string()),
            EventError::EmptySlug => AppError::invalid_field("title", err.to_string()),
            EventError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
