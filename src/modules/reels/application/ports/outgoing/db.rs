use async_trait::async_trait;

use crate::reels::application::domain::entities::{Celebrity, Reel, ReelStatus};

// ============================================================================
// Command Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NewCelebrity {
    pub name: String,
    pub sport: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReel {
    pub celebrity_id: i32,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub status: ReelStatus,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Reel {0} not found")]
    ReelNotFound(i32),
}

// ============================================================================
// Port Interface
// ============================================================================

/// Persistence port for celebrities and reels.
///
/// `find_celebrity` + `create_celebrity` form a read-then-write pair with no
/// transaction around them; callers accept the duplicate-row window that
/// opens under concurrent identical requests.
#[async_trait]
pub trait ReelRepository: Send + Sync {
    async fn find_celebrity(
        &self,
        name: &str,
        sport: &str,
    ) -> Result<Option<Celebrity>, RepositoryError>;

    async fn create_celebrity(&self, data: NewCelebrity) -> Result<Celebrity, RepositoryError>;

    async fn create_reel(&self, data: NewReel) -> Result<Reel, RepositoryError>;

    async fn set_reel_status(
        &self,
        reel_id: i32,
        status: ReelStatus,
    ) -> Result<Reel, RepositoryError>;
}
