pub use sea_orm_migration::prelude::*;

mod m20260829_100000_create_table_celebrities;
mod m20260829_100500_create_table_reels;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_100000_create_table_celebrities::Migration),
            Box::new(m20260829_100500_create_table_reels::Migration),
        ]
    }
}
