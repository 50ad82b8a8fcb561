//! Events Domain
//!
//! Event creation, attendee registration with an optional attendance cap,
//! badges and one-time check-in.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit log
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Slugs, capacity, badge URLs, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← SeaORM models for events, attendees, check_ins
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{handlers, InMemoryEventRepository, EventService};
//!
//! let service = EventService::new(InMemoryEventRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod slug;

pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use models::{
    Attendee, AttendeeFilter, Badge, CreateEvent, Event, EventAttendee, EventDetails,
    ListAttendeesQuery, RegisterAttendee,
};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
