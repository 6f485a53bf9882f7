//! SeaORM database migrations.
//!
//! Written with the schema builder so the same migrations run against
//! PostgreSQL and SQLite.

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users;
mod m20261001_000002_create_projects;
mod m20261001_000003_create_certificates;
mod m20261001_000004_create_notes;
mod m20261001_000005_create_resumes;
mod m20261001_000006_create_portfolios;
mod m20261001_000007_create_profiles;
mod m20261001_000008_create_email_verifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_projects::Migration),
            Box::new(m20261001_000003_create_certificates::Migration),
            Box::new(m20261001_000004_create_notes::Migration),
            Box::new(m20261001_000005_create_resumes::Migration),
            Box::new(m20261001_000006_create_portfolios::Migration),
            Box::new(m20261001_000007_create_profiles::Migration),
            Box::new(m20261001_000008_create_email_verifications::Migration),
        ]
    }
}
