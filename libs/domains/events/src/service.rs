use observability::RegistrationMetrics;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{
    Attendee, Badge, CheckIn, CreateEvent, Event, EventAttendee, EventDetails, ListAttendeesQuery,
    NewAttendee, NewEvent, RegisterAttendee,
};
use crate::repository::EventRepository;
use crate::slug::generate_slug;

/// Service layer for event registration and check-in
#[derive(Clone)]
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
    public_base_url: Option<String>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            public_base_url: None,
        }
    }

    /// Fixed scheme and host for check-in links, overriding the one derived
    /// from each request.
    pub fn with_public_base_url(mut self, url: Option<String>) -> Self {
        self.public_base_url = url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());
        self
    }

    /// Create an event whose slug is derived from its title.
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        let slug = generate_slug(&input.title);
        if slug.is_empty() {
            return Err(EventError::EmptySlug);
        }

        let event = self
            .repository
            .create_event(NewEvent {
                title: input.title,
                slug,
                details: input.details,
                maximum_attendees: input.maximum_attendees,
            })
            .await?;

        RegistrationMetrics::record_event_created();
        Ok(event)
    }

    pub async fn get_event(&self, id: Uuid) -> EventResult<EventDetails> {
        self.repository
            .find_event(id)
            .await?
            .ok_or(EventError::EventNotFound)
    }

    /// Register an attendee if the event exists and still has room.
    ///
    /// The capacity check and the insert are separate statements, so two
    /// concurrent registrations for the last seat can both succeed.
    pub async fn register_attendee(
        &self,
        event_id: Uuid,
        input: RegisterAttendee,
    ) -> EventResult<Attendee> {
        let result = self.try_register(event_id, input).await;

        RegistrationMetrics::record_registration(match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        });

        result
    }

    async fn try_register(&self, event_id: Uuid, input: RegisterAttendee) -> EventResult<Attendee> {
        let details = self.get_event(event_id).await?;

        if details.is_full() {
            tracing::info!(%event_id, attendees = details.attendees_amount, "Event is full");
            return Err(EventError::EventFull);
        }

        self.repository
            .create_attendee(NewAttendee {
                event_id,
                name: input.name,
                email: input.email,
            })
            .await
    }

    /// Badge for an attendee. `request_base_url` is the scheme and host the
    /// client used; a configured public base URL takes precedence.
    pub async fn attendee_badge(
        &self,
        attendee_id: i32,
        request_base_url: &str,
    ) -> EventResult<Badge> {
        let base_url = self.public_base_url.as_deref().unwrap_or(request_base_url);

        let badge = self
            .repository
            .find_badge(attendee_id)
            .await?
            .ok_or(EventError::AttendeeNotFound)?;

        Ok(Badge {
            name: badge.name,
            email: badge.email,
            event_title: badge.event_title,
            check_in_url: format!(
                "{}/attendees/{}/check-in",
                base_url.trim_end_matches('/'),
                attendee_id
            ),
        })
    }

    pub async fn check_in(&self, attendee_id: i32) -> EventResult<CheckIn> {
        let result = self.repository.create_check_in(attendee_id).await;

        RegistrationMetrics::record_check_in(match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        });

        result
    }

    /// One page of an event's attendees. An unknown event yields an empty page.
    pub async fn list_attendees(
        &self,
        event_id: Uuid,
        query: ListAttendeesQuery,
    ) -> EventResult<Vec<EventAttendee>> {
        self.repository
            .list_attendees(query.into_filter(event_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendeeBadge, AttendeeFilter};
    use crate::repository::MockEventRepository;
    use chrono::Utc;
    use mockall::predicate::{always, eq};

    fn event_details(id: Uuid, cap: Option<i32>, attendees_amount: u64) -> EventDetails {
        EventDetails {
            event: Event {
                id,
                title: "Unite Summit".into(),
                slug: "unite-summit".into(),
                details: None,
                maximum_attendees: cap,
                created_at: Utc::now(),
            },
            attendees_amount,
        }
    }

    fn registration() -> RegisterAttendee {
        RegisterAttendee {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_create_event_derives_slug() {
        let mut mock_repo = MockEventRepository::new();

        mock_repo
            .expect_create_event()
            .withf(|input| input.slug == "unite-summit-2026" && input.title == "Unite Summit 2026")
            .returning(|input| {
                Ok(Event {
                    id: Uuid::now_v7(),
                    title: input.title,
                    slug: input.slug,
                    details: input.details,
                    maximum_attendees: input.maximum_attendees,
                    created_at: Utc::now(),
                })
            });

        let service = EventService::new(mock_repo);
        let event = service
            .create_event(CreateEvent {
                title: "Unite Summit 2026".into(),
                details: None,
                maximum_attendees: Some(120),
            })
            .await
            .unwrap();

        assert_eq!(event.slug, "unite-summit-2026");
        assert_eq!(event.maximum_attendees, Some(120));
    }

    #[tokio::test]
    async fn test_create_event_rejects_title_without_slug_characters() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create_event().never();

        let service = EventService::new(mock_repo);
        let result = service
            .create_event(CreateEvent {
                title: "!!!".into(),
                details: None,
                maximum_attendees: None,
            })
            .await;

        assert!(matches!(result, Err(EventError::EmptySlug)));
    }

    #[tokio::test]
    async fn test_register_fails_for_unknown_event() {
        let mut mock_repo = MockEventRepository::new();
        let event_id = Uuid::now_v7();

        mock_repo
            .expect_find_event()
            .with(eq(event_id))
            .returning(|_| Ok(None));
        mock_repo.expect_create_attendee().never();

        let service = EventService::new(mock_repo);
        let result = service.register_attendee(event_id, registration()).await;

        assert!(matches!(result, Err(EventError::EventNotFound)));
    }

    #[tokio::test]
    async fn test_register_fails_when_event_is_full() {
        let mut mock_repo = MockEventRepository::new();
        let event_id = Uuid::now_v7();

        mock_repo
            .expect_find_event()
            .with(eq(event_id))
            .returning(move |id| Ok(Some(event_details(id, Some(1), 1))));
        mock_repo.expect_create_attendee().never();

        let service = EventService::new(mock_repo);
        let result = service.register_attendee(event_id, registration()).await;

        assert!(matches!(result, Err(EventError::EventFull)));
    }

    #[tokio::test]
    async fn test_register_inserts_when_seats_remain() {
        let mut mock_repo = MockEventRepository::new();
        let event_id = Uuid::now_v7();

        mock_repo
            .expect_find_event()
            .returning(|id| Ok(Some(event_details(id, Some(2), 1))));
        mock_repo
            .expect_create_attendee()
            .withf(move |input| input.event_id == event_id && input.email == "ada@example.com")
            .times(1)
            .returning(|input| {
                Ok(Attendee {
                    id: 1,
                    name: input.name,
                    email: input.email,
                    event_id: input.event_id,
                    created_at: Utc::now(),
                })
            });

        let service = EventService::new(mock_repo);
        let attendee = service.register_attendee(event_id, registration()).await.unwrap();

        assert_eq!(attendee.id, 1);
    }

    #[tokio::test]
    async fn test_register_surfaces_duplicate_email() {
        let mut mock_repo = MockEventRepository::new();

        mock_repo
            .expect_find_event()
            .returning(|id| Ok(Some(event_details(id, None, 3))));
        mock_repo
            .expect_create_attendee()
            .with(always())
            .returning(|_| Err(EventError::EmailTaken));

        let service = EventService::new(mock_repo);
        let result = service.register_attendee(Uuid::now_v7(), registration()).await;

        assert!(matches!(result, Err(EventError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_badge_builds_check_in_url() {
        let mut mock_repo = MockEventRepository::new();

        mock_repo.expect_find_badge().with(eq(5)).returning(|_| {
            Ok(Some(AttendeeBadge {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                event_title: "Unite Summit".into(),
            }))
        });

        let service = EventService::new(mock_repo);
        let badge = service
            .attendee_badge(5, "https://pass.example.com/")
            .await
            .unwrap();

        assert_eq!(badge.check_in_url, "https://pass.example.com/attendees/5/check-in");
        assert_eq!(badge.event_title, "Unite Summit");
    }

    #[tokio::test]
    async fn test_badge_prefers_configured_public_url() {
        let mut mock_repo = MockEventRepository::new();

        mock_repo.expect_find_badge().returning(|_| {
            Ok(Some(AttendeeBadge {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                event_title: "Unite Summit".into(),
            }))
        });

        let service = EventService::new(mock_repo)
            .with_public_base_url(Some("https://pass.in/".into()));
        let badge = service
            .attendee_badge(7, "http://attacker.example")
            .await
            .unwrap();

        assert_eq!(badge.check_in_url, "https://pass.in/attendees/7/check-in");
    }

    #[tokio::test]
    async fn test_badge_for_unknown_attendee() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_find_badge().returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let result = service.attendee_badge(404, "http://localhost:3333").await;

        assert!(matches!(result, Err(EventError::AttendeeNotFound)));
    }

    #[tokio::test]
    async fn test_list_uses_page_offsets() {
        let mut mock_repo = MockEventRepository::new();
        let event_id = Uuid::now_v7();

        mock_repo
            .expect_list_attendees()
            .with(eq(AttendeeFilter {
                event_id,
                query: Some("Ada".into()),
                limit: 10,
                offset: 30,
            }))
            .returning(|_| Ok(vec![]));

        let service = EventService::new(mock_repo);
        let page = service
            .list_attendees(
                event_id,
                ListAttendeesQuery {
                    query: Some("Ada".into()),
                    page_index: Some(3),
                },
            )
            .await
            .unwrap();

        assert!(page.is_empty());
    }
}
