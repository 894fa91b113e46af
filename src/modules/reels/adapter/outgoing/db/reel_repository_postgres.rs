use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement};
use std::sync::Arc;

use crate::reels::application::{
    domain::entities::{Celebrity, Reel, ReelStatus},
    ports::outgoing::{NewCelebrity, NewReel, ReelRepository, RepositoryError},
};

// ============================================================================
// Repository Implementation (Production)
// ============================================================================

#[derive(Clone)]
pub struct ReelRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReelRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // =====================================================
    // SQL builders
    // =====================================================

    fn find_celebrity_stmt(name: &str, sport: &str) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT id, name, sport, description, created_at
            FROM celebrities
            WHERE name = $1
              AND sport = $2
            LIMIT 1
            "#,
            vec![name.into(), sport.into()],
        )
    }

    fn insert_celebrity_stmt(data: &NewCelebrity) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO celebrities (name, sport, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, sport, description, created_at
            "#,
            vec![
                data.name.as_str().into(),
                data.sport.as_str().into(),
                data.description.clone().into(),
            ],
        )
    }

    fn insert_reel_stmt(data: &NewReel) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO reels (
              celebrity_id, title, description,
              video_url, thumbnail_url, status
            )
            VALUES ($1, $2, $3, $4, $5, $6::reel_status)
            RETURNING
              id, celebrity_id, title, description,
              video_url, thumbnail_url, status::text as status,
              created_at, updated_at
            "#,
            vec![
                data.celebrity_id.into(),
                data.title.as_str().into(),
                data.description.as_str().into(),
                data.video_url.as_str().into(),
                data.thumbnail_url.as_str().into(),
                data.status.to_string().into(),
            ],
        )
    }

    fn update_status_stmt(reel_id: i32, status: ReelStatus) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            UPDATE reels
            SET status = $2::reel_status
            WHERE id = $1
            RETURNING
              id, celebrity_id, title, description,
              video_url, thumbnail_url, status::text as status,
              created_at, updated_at
            "#,
            vec![reel_id.into(), status.to_string().into()],
        )
    }

    // =====================================================
    // Mapping helpers
    // =====================================================

    fn map_db_err(e: DbErr) -> RepositoryError {
        RepositoryError::Database(e.to_string())
    }

    fn parse_status(s: &str) -> Result<ReelStatus, RepositoryError> {
        match s {
            "processing" => Ok(ReelStatus::Processing),
            "completed" => Ok(ReelStatus::Completed),
            "failed" => Ok(ReelStatus::Failed),
            _ => Err(RepositoryError::Database(format!(
                "invalid reel status: {}",
                s
            ))),
        }
    }

    fn row_to_celebrity(row: &QueryResult) -> Result<Celebrity, RepositoryError> {
        Ok(Celebrity {
            id: row.try_get("", "id").map_err(Self::map_db_err)?,
            name: row.try_get("", "name").map_err(Self::map_db_err)?,
            sport: row.try_get("", "sport").map_err(Self::map_db_err)?,
            description: row.try_get("", "description").map_err(Self::map_db_err)?,
            created_at: row.try_get("", "created_at").map_err(Self::map_db_err)?,
        })
    }

    fn row_to_reel(row: &QueryResult) -> Result<Reel, RepositoryError> {
        let status: String = row.try_get("", "status").map_err(Self::map_db_err)?;

        Ok(Reel {
            id: row.try_get("", "id").map_err(Self::map_db_err)?,
            celebrity_id: row.try_get("", "celebrity_id").map_err(Self::map_db_err)?,
            title: row.try_get("", "title").map_err(Self::map_db_err)?,
            description: row.try_get("", "description").map_err(Self::map_db_err)?,
            video_url: row.try_get("", "video_url").map_err(Self::map_db_err)?,
            thumbnail_url: row
                .try_get("", "thumbnail_url")
                .map_err(Self::map_db_err)?,
            status: Self::parse_status(&status)?,
            created_at: row.try_get("", "created_at").map_err(Self::map_db_err)?,
            updated_at: row.try_get("", "updated_at").map_err(Self::map_db_err)?,
        })
    }
}

#[async_trait]
impl ReelRepository for ReelRepositoryPostgres {
    async fn find_celebrity(
        &self,
        name: &str,
        sport: &str,
    ) -> Result<Option<Celebrity>, RepositoryError> {
        let stmt = Self::find_celebrity_stmt(name, sport);

        let result = self.db.query_one(stmt).await.map_err(Self::map_db_err)?;

        result.as_ref().map(Self::row_to_celebrity).transpose()
    }

    async fn create_celebrity(&self, data: NewCelebrity) -> Result<Celebrity, RepositoryError> {
        let stmt = Self::insert_celebrity_stmt(&data);

        let result = self.db.query_one(stmt).await.map_err(Self::map_db_err)?;

        let row = result.ok_or_else(|| {
            RepositoryError::Database("insert returned no celebrity row".to_string())
        })?;
        Self::row_to_celebrity(&row)
    }

    async fn create_reel(&self, data: NewReel) -> Result<Reel, RepositoryError> {
        let stmt = Self::insert_reel_stmt(&data);

        let result = self.db.query_one(stmt).await.map_err(Self::map_db_err)?;

        let row = result
            .ok_or_else(|| RepositoryError::Database("insert returned no reel row".to_string()))?;
        Self::row_to_reel(&row)
    }

    async fn set_reel_status(
        &self,
        reel_id: i32,
        status: ReelStatus,
    ) -> Result<Reel, RepositoryError> {
        let stmt = Self::update_status_stmt(reel_id, status);

        let result = self.db.query_one(stmt).await.map_err(Self::map_db_err)?;

        let row = result.ok_or(RepositoryError::ReelNotFound(reel_id))?;
        Self::row_to_reel(&row)
    }
}

// ============================================================================
// Tests (deterministic, MockDatabase-backed)
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use maplit::btreemap;
    use sea_orm::{MockDatabase, Value};
    use std::collections::BTreeMap;

    fn celebrity_row(id: i32, name: &str, sport: &str) -> BTreeMap<String, Value> {
        let now = Utc::now().fixed_offset();
        btreemap! {
            "id".to_string() => Value::Int(Some(id)),
            "name".to_string() => Value::String(Some(Box::new(name.to_string()))),
            "sport".to_string() => Value::String(Some(Box::new(sport.to_string()))),
            "description".to_string() => Value::String(None),
            "created_at".to_string() =>
                Value::ChronoDateTimeWithTimeZone(Some(Box::new(now))),
        }
    }

    fn reel_row(id: i32, celebrity_id: i32, status: &str) -> BTreeMap<String, Value> {
        let now = Utc::now().fixed_offset();
        btreemap! {
            "id".to_string() => Value::Int(Some(id)),
            "celebrity_id".to_string() => Value::Int(Some(celebrity_id)),
            "title".to_string() =>
                Value::String(Some(Box::new("The GOAT".to_string()))),
            "description".to_string() =>
                Value::String(Some(Box::new("an excerpt".to_string()))),
            "video_url".to_string() => Value::String(Some(Box::new(
                "https://storage.example/videos/x.mp4".to_string(),
            ))),
            "thumbnail_url".to_string() => Value::String(Some(Box::new(
                "https://storage.example/thumbnails/x.jpg".to_string(),
            ))),
            "status".to_string() => Value::String(Some(Box::new(status.to_string()))),
            "created_at".to_string() =>
                Value::ChronoDateTimeWithTimeZone(Some(Box::new(now))),
            "updated_at".to_string() =>
                Value::ChronoDateTimeWithTimeZone(Some(Box::new(now))),
        }
    }

    fn new_reel(celebrity_id: i32) -> NewReel {
        NewReel {
            celebrity_id,
            title: "The GOAT".to_string(),
            description: "an excerpt".to_string(),
            video_url: "https://storage.example/videos/x.mp4".to_string(),
            thumbnail_url: "https://storage.example/thumbnails/x.jpg".to_string(),
            status: ReelStatus::Completed,
        }
    }

    // -----------------------
    // find_celebrity
    // -----------------------

    #[tokio::test]
    async fn test_find_celebrity_hit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![celebrity_row(11, "Lionel Messi", "Soccer")]])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let found = repo
            .find_celebrity("Lionel Messi", "Soccer")
            .await
            .expect("query ok")
            .expect("row");

        assert_eq!(found.id, 11);
        assert_eq!(found.name, "Lionel Messi");
        assert_eq!(found.description, None);
    }

    #[tokio::test]
    async fn test_find_celebrity_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<BTreeMap<String, Value>>::new()])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let found = repo
            .find_celebrity("Nobody", "Curling")
            .await
            .expect("query ok");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_celebrity_db_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection error".to_string())])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let err = repo.find_celebrity("A", "B").await.unwrap_err();

        match err {
            RepositoryError::Database(msg) => assert!(msg.contains("connection error")),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    // -----------------------
    // create_celebrity
    // -----------------------

    #[tokio::test]
    async fn test_create_celebrity_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![celebrity_row(42, "Simone Biles", "Gymnastics")]])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let created = repo
            .create_celebrity(NewCelebrity {
                name: "Simone Biles".to_string(),
                sport: "Gymnastics".to_string(),
                description: None,
            })
            .await
            .expect("created");

        assert_eq!(created.id, 42);
        assert_eq!(created.sport, "Gymnastics");
    }

    // -----------------------
    // create_reel
    // -----------------------

    #[tokio::test]
    async fn test_create_reel_maps_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![reel_row(7, 11, "completed")]])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let reel = repo.create_reel(new_reel(11)).await.expect("created");

        assert_eq!(reel.id, 7);
        assert_eq!(reel.celebrity_id, 11);
        assert_eq!(reel.status, ReelStatus::Completed);
        assert_eq!(reel.title, "The GOAT");
    }

    #[tokio::test]
    async fn test_create_reel_rejects_unknown_status_string() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![reel_row(7, 11, "half-done")]])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let err = repo.create_reel(new_reel(11)).await.unwrap_err();

        match err {
            RepositoryError::Database(msg) => assert!(msg.contains("invalid reel status")),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    // -----------------------
    // set_reel_status
    // -----------------------

    #[tokio::test]
    async fn test_set_reel_status_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![reel_row(7, 11, "failed")]])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let reel = repo
            .set_reel_status(7, ReelStatus::Failed)
            .await
            .expect("updated");

        assert_eq!(reel.status, ReelStatus::Failed);
    }

    #[tokio::test]
    async fn test_set_reel_status_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<BTreeMap<String, Value>>::new()])
            .into_connection();

        let repo = ReelRepositoryPostgres::new(Arc::new(db));
        let err = repo
            .set_reel_status(99, ReelStatus::Completed)
            .await
            .unwrap_err();

        assert_eq!(err, RepositoryError::ReelNotFound(99));
    }
}
