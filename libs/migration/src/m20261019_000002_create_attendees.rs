use sea_orm_migration::{prelude::*, schema::*};

use super::m20261019_000001_create_events::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendees::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendees::Id))
                    .col(string(Attendees::Name))
                    .col(string(Attendees::Email))
                    .col(uuid(Attendees::EventId))
                    .col(
                        timestamp_with_time_zone(Attendees::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendees_event_id")
                            .from(Attendees::Table, Attendees::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One registration per e-mail per event
        manager
            .create_index(
                Index::create()
                    .name("uq_attendees_event_id_email")
                    .table(Attendees::Table)
                    .col(Attendees::EventId)
                    .col(Attendees::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendees_event_id_created_at")
                    .table(Attendees::Table)
                    .col(Attendees::EventId)
                    .col(Attendees::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Attendees {
    Table,
    Id,
    Name,
    Email,
    EventId,
    CreatedAt,
}
