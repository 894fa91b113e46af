use async_trait::async_trait;

use crate::reels::application::domain::entities::{
    GeneratedReel, GenerationRequest, GenerationRequestError,
};
use crate::reels::application::domain::stage::PipelineStage;
use crate::reels::application::ports::outgoing::{
    EncodeError, ObjectStoreError, RepositoryError, SpeechError, TextGenerationError,
};

// ============================================================================
// Error Types
// ============================================================================

/// Fatal pipeline failure surfaced to the caller.
///
/// Every variant names (directly or via `stage()`) the pipeline stage that
/// died, and preserves the originating collaborator's message. Callers should
/// treat any of these as "no reel was created".
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerateReelError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] GenerationRequestError),

    #[error("Workspace I/O failed during {stage}: {detail}")]
    Workspace {
        stage: PipelineStage,
        detail: String,
    },

    #[error("Script generation failed: {0}")]
    Script(#[from] TextGenerationError),

    #[error("Speech synthesis failed: {0}")]
    Speech(#[from] SpeechError),

    #[error("Image sourcing exhausted every tier: {detail}")]
    SourcingExhausted { detail: String },

    #[error("Video composition failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Storage upload failed during {stage}: {source}")]
    Storage {
        stage: PipelineStage,
        source: ObjectStoreError,
    },

    #[error("Persistence failed during {stage}: {source}")]
    Repository {
        stage: PipelineStage,
        source: RepositoryError,
    },
}

impl GenerateReelError {
    /// The stage the pipeline was in when this error was raised.
    pub fn stage(&self) -> PipelineStage {
        match self {
            GenerateReelError::InvalidRequest(_) => PipelineStage::Start,
            GenerateReelError::Workspace { stage, .. } => *stage,
            GenerateReelError::Script(_) => PipelineStage::ScriptReady,
            GenerateReelError::Speech(_) => PipelineStage::AudioReady,
            GenerateReelError::SourcingExhausted { .. } => PipelineStage::ImagesReady,
            GenerateReelError::Encode(_) => PipelineStage::VideoComposed,
            GenerateReelError::Storage { stage, .. } => *stage,
            GenerateReelError::Repository { stage, .. } => *stage,
        }
    }
}

// ============================================================================
// Port Interface
// ============================================================================

/// The pipeline's boundary, consumed by the web layer.
#[async_trait]
pub trait GenerateReelUseCase: Send + Sync {
    async fn execute(&self, request: GenerationRequest)
        -> Result<GeneratedReel, GenerateReelError>;
}
