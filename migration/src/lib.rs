pub use sea_orm_migration::prelude::*;

mod m20251101_000001_app_user;
mod m20251101_000002_source;
mod m20251101_000003_event;
mod m20251101_000004_source_event;
mod m20251101_000005_source_change_request;
mod m20251101_000006_audit_log;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_app_user::Migration),
            Box::new(m20251101_000002_source::Migration),
            Box::new(m20251101_000003_event::Migration),
            Box::new(m20251101_000004_source_event::Migration),
            Box::new(m20251101_000005_source_change_request::Migration),
            Box::new(m20251101_000006_audit_log::Migration),
        ]
    }
}
