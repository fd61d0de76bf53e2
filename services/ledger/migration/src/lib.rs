use sea_orm_migration::prelude::*;

mod m20251001_000001_create_courses;
mod m20251001_000002_create_events;
mod m20251001_000003_create_shots;
mod m20251001_000004_create_single_play_credits;
mod m20251001_000005_create_prize_claims;
mod m20251001_000006_create_event_registrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_courses::Migration),
            Box::new(m20251001_000002_create_events::Migration),
            Box::new(m20251001_000003_create_shots::Migration),
            Box::new(m20251001_000004_create_single_play_credits::Migration),
            Box::new(m20251001_000005_create_prize_claims::Migration),
            Box::new(m20251001_000006_create_event_registrations::Migration),
        ]
    }
}
