//! # Reels Table Migration
//!
//! One row per generated short video. A reel is created only after every media
//! artifact (audio, video, thumbnail) has been uploaded, so the pipeline
//! inserts rows directly in the `completed` state; `processing` and `failed`
//! exist for future async post-processing.
//!
//! Ownership: a reel references its celebrity but does not own it. Deleting a
//! celebrity is restricted while reels point at it, never cascaded.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create enum type for reels.status
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$
                BEGIN
                    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'reel_status') THEN
                        CREATE TYPE reel_status AS ENUM ('processing', 'completed', 'failed');
                    END IF;
                END$$;
                "#,
            )
            .await?;

        // =====================================================
        // Create reels table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Reels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reels::CelebrityId).integer().not_null())
                    .col(ColumnDef::new(Reels::Title).string_len(255).not_null())
                    // Script excerpt, capped at 255 chars by the pipeline
                    .col(ColumnDef::new(Reels::Description).text())
                    .col(ColumnDef::new(Reels::VideoUrl).string_len(255).not_null())
                    .col(ColumnDef::new(Reels::ThumbnailUrl).string_len(255))
                    .col(
                        ColumnDef::new(Reels::Status)
                            .custom(Alias::new("reel_status"))
                            .not_null()
                            .default(Expr::cust("'processing'::reel_status")),
                    )
                    .col(
                        ColumnDef::new(Reels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reels_celebrity_id")
                            .from(Reels::Table, Reels::CelebrityId)
                            .to(Celebrities::Table, Celebrities::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // "Reels for celebrity X" lookups
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_reels_celebrity_id
                ON reels (celebrity_id);
                "#,
            )
            .await?;

        // Gallery queries only show completed reels, newest first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_reels_status_created
                ON reels (status, created_at DESC);
                "#,
            )
            .await?;

        // =====================================================
        // updated_at trigger
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_reels_updated_at
                BEFORE UPDATE ON reels
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
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
                DROP TRIGGER IF EXISTS update_reels_updated_at ON reels;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_reels_celebrity_id;
                DROP INDEX IF EXISTS idx_reels_status_created;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Reels::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TYPE IF EXISTS reel_status;
                "#,
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Reels {
    Table,
    Id,
    CelebrityId,
    Title,
    Description,
    VideoUrl,
    ThumbnailUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Celebrities {
    Table,
    Id,
}
