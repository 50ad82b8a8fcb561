use sea_orm_migration::{prelude::*, schema::*};

use super::m20261019_000002_create_attendees::Attendees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CheckIns::Table)
                    .if_not_exists()
                    .col(pk_auto(CheckIns::Id))
                    .col(
                        timestamp_with_time_zone(CheckIns::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    // Unique: an attendee checks in at most once
                    .col(integer_uniq(CheckIns::AttendeeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_check_ins_attendee_id")
                            .from(CheckIns::Table, CheckIns::AttendeeId)
                            .to(Attendees::Table, Attendees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CheckIns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CheckIns {
    Table,
    Id,
    CreatedAt,
    AttendeeId,
}
