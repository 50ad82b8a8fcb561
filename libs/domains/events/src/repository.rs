use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{
    Attendee, AttendeeBadge, AttendeeFilter, CheckIn, Event, EventAttendee, EventDetails,
    NewAttendee, NewEvent,
};

/// Persistence for events, attendees and check-ins.
///
/// Implementations enforce uniqueness and referential integrity themselves and
/// report violations as domain errors:
/// - duplicate slug: [`EventError::SlugTaken`]
/// - duplicate (event, e-mail): [`EventError::EmailTaken`]
/// - attendee for a missing event: [`EventError::EventNotFound`]
/// - second check-in: [`EventError::AlreadyCheckedIn`]
/// - check-in for a missing attendee: [`EventError::AttendeeNotFound`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create_event(&self, input: NewEvent) -> EventResult<Event>;

    /// Event with its current attendee count.
    async fn find_event(&self, id: Uuid) -> EventResult<Option<EventDetails>>;

    async fn create_attendee(&self, input: NewAttendee) -> EventResult<Attendee>;

    async fn find_badge(&self, attendee_id: i32) -> EventResult<Option<AttendeeBadge>>;

    async fn create_check_in(&self, attendee_id: i32) -> EventResult<CheckIn>;

    /// Attendees of an event, newest first, with their check-in time.
    async fn list_attendees(&self, filter: AttendeeFilter) -> EventResult<Vec<EventAttendee>>;
}

#[derive(Debug, Default)]
struct Store {
    events: HashMap<Uuid, Event>,
    attendees: BTreeMap<i32, Attendee>,
    check_ins: HashMap<i32, CheckIn>,
    last_attendee_id: i32,
    last_check_in_id: i32,
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create_event(&self, input: NewEvent) -> EventResult<Event> {
        let mut store = self.store.write().await;

        if store.events.values().any(|e| e.slug == input.slug) {
            return Err(EventError::SlugTaken);
        }

        let event = Event {
            id: Uuid::now_v7(),
            title: input.title,
            slug: input.slug,
            details: input.details,
            maximum_attendees: input.maximum_attendees,
            created_at: Utc::now(),
        };
        store.events.insert(event.id, event.clone());

        tracing::info!(event_id = %event.id, slug = %event.slug, "Created event");
        Ok(event)
    }

    async fn find_event(&self, id: Uuid) -> EventResult<Option<EventDetails>> {
        let store = self.store.read().await;

        Ok(store.events.get(&id).map(|event| EventDetails {
            event: event.clone(),
            attendees_amount: store
                .attendees
                .values()
                .filter(|a| a.event_id == id)
                .count() as u64,
        }))
    }

    async fn create_attendee(&self, input: NewAttendee) -> EventResult<Attendee> {
        let mut store = self.store.write().await;

        if !store.events.contains_key(&input.event_id) {
            return Err(EventError::EventNotFound);
        }

        let duplicate = store
            .attendees
            .values()
            .any(|a| a.event_id == input.event_id && a.email == input.email);
        if duplicate {
            return Err(EventError::EmailTaken);
        }

        store.last_attendee_id += 1;
        let attendee = Attendee {
            id: store.last_attendee_id,
            name: input.name,
            email: input.email,
            event_id: input.event_id,
            created_at: Utc::now(),
        };
        store.attendees.insert(attendee.id, attendee.clone());

        tracing::info!(attendee_id = attendee.id, event_id = %attendee.event_id, "Registered attendee");
        Ok(attendee)
    }

    async fn find_badge(&self, attendee_id: i32) -> EventResult<Option<AttendeeBadge>> {
        let store = self.store.read().await;

        Ok(store.attendees.get(&attendee_id).and_then(|attendee| {
            store.events.get(&attendee.event_id).map(|event| AttendeeBadge {
                name: attendee.name.clone(),
                email: attendee.email.clone(),
                event_title: event.title.clone(),
            })
        }))
    }

    async fn create_check_in(&self, attendee_id: i32) -> EventResult<CheckIn> {
        let mut store = self.store.write().await;

        if !store.attendees.contains_key(&attendee_id) {
            return Err(EventError::AttendeeNotFound);
        }
        if store.check_ins.contains_key(&attendee_id) {
            return Err(EventError::AlreadyCheckedIn);
        }

        store.last_check_in_id += 1;
        let check_in = CheckIn {
            id: store.last_check_in_id,
            attendee_id,
            created_at: Utc::now(),
        };
        store.check_ins.insert(attendee_id, check_in.clone());

        tracing::info!(attendee_id, "Checked in attendee");
        Ok(check_in)
    }

    async fn list_attendees(&self, filter: AttendeeFilter) -> EventResult<Vec<EventAttendee>> {
        let store = self.store.read().await;

        let mut matching: Vec<&Attendee> = store
            .attendees
            .values()
            .filter(|a| a.event_id == filter.event_id)
            .filter(|a| {
                filter
                    .query
                    .as_deref()
                    .is_none_or(|query| a.name.contains(query))
            })
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .map(|a| EventAttendee {
                id: a.id,
                name: a.name.clone(),
                email: a.email.clone(),
                created_at: a.created_at,
                checked_in_at: store.check_ins.get(&a.id).map(|c| c.created_at),
            })
            .collect())
    }
}
