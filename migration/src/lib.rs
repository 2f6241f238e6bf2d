pub use sea_orm_migration::prelude::*;

mod m20251101_000001_user;
mod m20251101_000002_category;
mod m20251101_000003_ticket;
mod m20251101_000004_comment;
mod m20251101_000005_attachment;
mod m20251101_000006_vote;
mod m20251101_000007_notification;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_user::Migration),
            Box::new(m20251101_000002_category::Migration),
            Box::new(m20251101_000003_ticket::Migration),
            Box::new(m20251101_000004_comment::Migration),
            Box::new(m20251101_000005_attachment::Migration),
            Box::new(m20251101_000006_vote::Migration),
            Box::new(m20251101_000007_notification::Migration),
        ]
    }
}
