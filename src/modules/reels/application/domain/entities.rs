use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Lifecycle state of a reel row.
///
/// The pipeline only ever inserts `Completed` rows (a reel exists once all of
/// its media artifacts are uploaded). `Processing` and `Failed` are kept for
/// future async post-processing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReelStatus {
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for ReelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReelStatus::Processing => "processing",
            ReelStatus::Completed => "completed",
            ReelStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Celebrity {
    pub id: i32,
    pub name: String,
    pub sport: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reel {
    pub id: i32,
    pub celebrity_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub status: ReelStatus,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Incoming request for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub name: String,
    pub sport: String,
    pub description: Option<String>,
    /// When set, the celebrity is trusted as-is and no lookup happens.
    pub celebrity_id: Option<i32>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GenerationRequestError {
    #[error("Field '{0}' cannot be empty")]
    EmptyField(&'static str),
}

impl GenerationRequest {
    /// Name and sport must be non-empty unless an existing celebrity id is
    /// supplied (the id alone is enough to generate against).
    pub fn validate(&self) -> Result<(), GenerationRequestError> {
        if self.celebrity_id.is_some() {
            return Ok(());
        }
        if self.name.trim().is_empty() {
            return Err(GenerationRequestError::EmptyField("name"));
        }
        if self.sport.trim().is_empty() {
            return Err(GenerationRequestError::EmptyField("sport"));
        }
        Ok(())
    }
}

/// Celebrity summary embedded in the pipeline result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CelebritySummary {
    pub id: i32,
    pub name: String,
    pub sport: String,
}

/// The pipeline's public result: everything the web layer needs to show a
/// finished reel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedReel {
    pub title: String,
    pub script: String,
    pub audio_url: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub celebrity: CelebritySummary,
}

/// Which sourcing tier produced an image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageProvenance {
    StockPhoto,
    AiGenerated,
    GenericStock,
    Placeholder,
}

impl fmt::Display for ImageProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageProvenance::StockPhoto => "stock_photo",
            ImageProvenance::AiGenerated => "ai_generated",
            ImageProvenance::GenericStock => "generic_stock",
            ImageProvenance::Placeholder => "placeholder",
        };
        write!(f, "{s}")
    }
}

/// A validated local image: the file exists and clears the byte-size floor
/// for its provenance at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCandidate {
    pub path: PathBuf,
    pub provenance: ImageProvenance,
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, sport: &str, celebrity_id: Option<i32>) -> GenerationRequest {
        GenerationRequest {
            name: name.to_string(),
            sport: sport.to_string(),
            description: None,
            celebrity_id,
        }
    }

    #[test]
    fn test_request_valid_with_name_and_sport() {
        assert!(request("Lionel Messi", "Soccer", None).validate().is_ok());
    }

    #[test]
    fn test_request_rejects_empty_name() {
        let err = request("  ", "Soccer", None).validate().unwrap_err();
        assert_eq!(err, GenerationRequestError::EmptyField("name"));
    }

    #[test]
    fn test_request_rejects_empty_sport() {
        let err = request("Lionel Messi", "", None).validate().unwrap_err();
        assert_eq!(err, GenerationRequestError::EmptyField("sport"));
    }

    #[test]
    fn test_request_with_celebrity_id_skips_field_checks() {
        assert!(request("", "", Some(7)).validate().is_ok());
    }

    #[test]
    fn test_reel_status_serializes_lowercase() {
        let json = serde_json::to_string(&ReelStatus::Completed).unwrap();
        assert_eq!(json, r#""completed""#);
        assert_eq!(ReelStatus::Failed.to_string(), "failed");
    }
}
