use async_trait::async_trait;
use std::path::PathBuf;

// ============================================================================
// Command Types
// ============================================================================

/// One composition job: loop the images across the target duration, pad/trim
/// the audio to match, mux into `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeJob {
    pub images: Vec<PathBuf>,
    pub audio: PathBuf,
    pub output: PathBuf,
    pub duration_secs: u32,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Could not launch media encoder: {0}")]
    Spawn(String),

    #[error("Media encoder exited with {status}: {stderr}")]
    Encoder { status: String, stderr: String },
}

// ============================================================================
// Port Interface
// ============================================================================

/// External media encoder. The contract is file paths and a duration; the
/// encoding profile is the adapter's fixed business.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoEncoder: Send + Sync {
    async fn compose(&self, job: &EncodeJob) -> Result<(), EncodeError>;
}
