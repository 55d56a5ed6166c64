pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_catalog;
mod m20260301_000002_content;
mod m20260301_000003_inbox;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_catalog::Migration),
            Box::new(m20260301_000002_content::Migration),
            Box::new(m20260301_000003_inbox::Migration),
        ]
    }
}
