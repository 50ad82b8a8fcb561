pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_events;
mod m20261019_000002_create_attendees;
mod m20261019_000003_create_check_ins;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_events::Migration),
            Box::new(m20261019_000002_create_attendees::Migration),
            Box::new(m20261019_000003_create_check_ins::Migration),
        ]
    }
}
