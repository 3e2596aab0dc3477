pub use sea_orm_migration::prelude::*;

mod m20250726_000001_create_mechanic_profiles;
mod m20250726_000002_create_service_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250726_000001_create_mechanic_profiles::Migration),
            Box::new(m20250726_000002_create_service_requests::Migration),
        ]
    }
}
