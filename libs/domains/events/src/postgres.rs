use async_trait::async_trait;
use chrono::Utc;
use database::{ConstraintViolation, constraint_violation};
use observability::OperationTimer;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SelectTwo,
};
use uuid::Uuid;

use crate::{
    entity::{attendee, check_in, event},
    error::{EventError, EventResult},
    models::{
        Attendee, AttendeeBadge, AttendeeFilter, CheckIn, Event, EventAttendee, EventDetails,
        NewAttendee, NewEvent,
    },
    repository::EventRepository,
};

/// PostgreSQL-backed repository; uniqueness and references are enforced by
/// the schema and translated from the driver's constraint errors.
#[derive(Clone)]
pub struct PgEventRepository {
    db: DatabaseConnection,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a failed insert: unique violations become `on_unique`, foreign-key
/// violations become `on_missing_parent`, everything else stays a database error.
fn insert_error(err: DbErr, on_unique: EventError, on_missing_parent: EventError) -> EventError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Unique(detail)) => {
            tracing::debug!(%detail, "Unique constraint violated");
            on_unique
        }
        Some(ConstraintViolation::ForeignKey(detail)) => {
            tracing::debug!(%detail, "Foreign key constraint violated");
            on_missing_parent
        }
        None => EventError::Database(err),
    }
}

/// Escape character paired with [`contains_pattern`].
const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching `query` anywhere, with wildcards in `query` taken literally.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// One page of attendees joined with their check-in, newest first.
fn attendees_page(filter: &AttendeeFilter) -> SelectTwo<attendee::Entity, check_in::Entity> {
    let mut query = attendee::Entity::find()
        .find_also_related(check_in::Entity)
        .filter(attendee::Column::EventId.eq(filter.event_id));

    if let Some(name) = filter.query.as_deref() {
        query = query.filter(
            attendee::Column::Name.like(LikeExpr::new(contains_pattern(name)).escape(LIKE_ESCAPE)),
        );
    }

    query
        .order_by_desc(attendee::Column::CreatedAt)
        .order_by_desc(attendee::Column::Id)
        .limit(filter.limit)
        .offset(filter.offset)
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create_event(&self, input: NewEvent) -> EventResult<Event> {
        let _timer = OperationTimer::new("create_event");

        let model = event::ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(input.title),
            slug: Set(input.slug),
            details: Set(input.details),
            maximum_attendees: Set(input.maximum_attendees),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| insert_error(e, EventError::SlugTaken, EventError::EventNotFound))?;

        tracing::info!(event_id = %model.id, slug = %model.slug, "Created event");
        Ok(model.into())
    }

    async fn find_event(&self, id: Uuid) -> EventResult<Option<EventDetails>> {
        let _timer = OperationTimer::new("find_event");

        let Some(model) = event::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let attendees_amount = attendee::Entity::find()
            .filter(attendee::Column::EventId.eq(id))
            .count(&self.db)
            .await?;

        Ok(Some(EventDetails {
            event: model.into(),
            attendees_amount,
        }))
    }

    async fn create_attendee(&self, input: NewAttendee) -> EventResult<Attendee> {
        let _timer = OperationTimer::new("create_attendee");

        let model = attendee::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
            event_id: Set(input.event_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| insert_error(e, EventError::EmailTaken, EventError::EventNotFound))?;

        tracing::info!(attendee_id = model.id, event_id = %model.event_id, "Registered attendee");
        Ok(model.into())
    }

    async fn find_badge(&self, attendee_id: i32) -> EventResult<Option<AttendeeBadge>> {
        let _timer = OperationTimer::new("find_badge");

        let row = attendee::Entity::find_by_id(attendee_id)
            .find_also_related(event::Entity)
            .one(&self.db)
            .await?;

        Ok(row.and_then(|(attendee, event)| {
            event.map(|event| AttendeeBadge {
                name: attendee.name,
                email: attendee.email,
                event_title: event.title,
            })
        }))
    }

    async fn create_check_in(&self, attendee_id: i32) -> EventResult<CheckIn> {
        let _timer = OperationTimer::new("create_check_in");

        let model = check_in::ActiveModel {
            id: NotSet,
            attendee_id: Set(attendee_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            insert_error(e, EventError::AlreadyCheckedIn, EventError::AttendeeNotFound)
        })?;

        tracing::info!(attendee_id, check_in_id = model.id, "Checked in attendee");
        Ok(model.into())
    }

    async fn list_attendees(&self, filter: AttendeeFilter) -> EventResult<Vec<EventAttendee>> {
        let _timer = OperationTimer::new("list_attendees");

        let rows = attendees_page(&filter).all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(attendee, check_in)| EventAttendee {
                id: attendee.id,
                name: attendee.name,
                email: attendee.email,
                created_at: attendee.created_at.into(),
                checked_in_at: check_in.map(|c| c.created_at.into()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait, RuntimeErr};

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Ada"), "%Ada%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn test_attendees_page_declares_like_escape() {
        let filter = AttendeeFilter {
            event_id: Uuid::now_v7(),
            query: Some("50%".into()),
            limit: 10,
            offset: 20,
        };

        let sql = attendees_page(&filter)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains("LIKE"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(sql.contains("LIMIT 10"), "{sql}");
        assert!(sql.contains("OFFSET 20"), "{sql}");
    }

    #[test]
    fn test_attendees_page_without_query_has_no_like() {
        let filter = AttendeeFilter {
            event_id: Uuid::now_v7(),
            query: None,
            limit: 10,
            offset: 0,
        };

        let sql = attendees_page(&filter)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(!sql.contains("LIKE"), "{sql}");
    }

    #[test]
    fn test_unclassified_errors_stay_database_errors() {
        let err = insert_error(
            DbErr::Query(RuntimeErr::Internal("connection reset".into())),
            EventError::SlugTaken,
            EventError::EventNotFound,
        );
        assert!(matches!(err, EventError::Database(_)));
    }

    #[tokio::test]
    async fn test_find_event_returns_none_when_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<event::Model>::new()])
            .into_connection();

        let repo = PgEventRepository::new(db);
        assert!(repo.find_event(Uuid::now_v7()).await.unwrap().is_none());
    }
}
