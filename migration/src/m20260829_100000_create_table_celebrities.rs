//! # Celebrities Table Migration
//!
//! One row per real-world athlete the app knows about. Reels reference this
//! table; the pipeline looks a celebrity up by (name, sport) before creating
//! a new one.
//!
//! Note: there is deliberately NO unique constraint on (name, sport). The
//! pipeline does a read-then-create, so concurrent identical requests can
//! produce duplicate rows. That window is an accepted limitation of the
//! current design and is documented where the lookup happens.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Shared updated_at trigger function
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = CURRENT_TIMESTAMP;
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;
                "#,
            )
            .await?;

        // =====================================================
        // Create celebrities table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Celebrities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Celebrities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Celebrities::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Celebrities::Sport)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Celebrities::Description).text())
                    .col(
                        ColumnDef::new(Celebrities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // The pipeline resolves celebrities by (name, sport) on every request
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_celebrities_name_sport
                ON celebrities (name, sport);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_celebrities_name_sport;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Celebrities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Celebrities {
    Table,
    Id,
    Name,
    Sport,
    Description,
    CreatedAt,
}
