//! Pipeline stage machine.
//!
//! The generation pipeline is a DAG with two parallel windows
//! (audio synthesis ∥ image sourcing, then audio upload ∥ video composition ∥
//! thumbnail upload). Stages inside a window share a rank and may be logged in
//! either order; everything else is strictly ordered. The orchestrator records
//! every transition so a failure can name the stage it died in.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    SubjectResolved,
    ScriptReady,
    AudioReady,
    ImagesReady,
    VideoComposed,
    AudioPublished,
    ThumbnailPublished,
    VideoPublished,
    RecordPersisted,
    Completed,
    Failed,
}

impl PipelineStage {
    /// Position in the DAG; parallel siblings share a rank.
    fn rank(self) -> u8 {
        match self {
            PipelineStage::Start => 0,
            PipelineStage::SubjectResolved => 1,
            PipelineStage::ScriptReady => 2,
            PipelineStage::AudioReady | PipelineStage::ImagesReady => 3,
            PipelineStage::VideoComposed
            | PipelineStage::AudioPublished
            | PipelineStage::ThumbnailPublished => 4,
            PipelineStage::VideoPublished => 5,
            PipelineStage::RecordPersisted => 6,
            PipelineStage::Completed => 7,
            PipelineStage::Failed => u8::MAX,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStage::Start => "start",
            PipelineStage::SubjectResolved => "subject-resolved",
            PipelineStage::ScriptReady => "script-ready",
            PipelineStage::AudioReady => "audio-ready",
            PipelineStage::ImagesReady => "images-ready",
            PipelineStage::VideoComposed => "video-composed",
            PipelineStage::AudioPublished => "audio-published",
            PipelineStage::ThumbnailPublished => "thumbnail-published",
            PipelineStage::VideoPublished => "video-published",
            PipelineStage::RecordPersisted => "record-persisted",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StageError {
    #[error("Invalid stage transition from {from} to {to}")]
    InvalidTransition {
        from: PipelineStage,
        to: PipelineStage,
    },
}

/// Audit log of stage transitions for one pipeline run.
#[derive(Debug)]
pub struct StageLog {
    entries: Vec<(PipelineStage, chrono::DateTime<chrono::Utc>)>,
}

impl StageLog {
    pub fn new() -> Self {
        Self {
            entries: vec![(PipelineStage::Start, chrono::Utc::now())],
        }
    }

    pub fn current(&self) -> PipelineStage {
        self.entries
            .last()
            .map(|(s, _)| *s)
            .unwrap_or(PipelineStage::Start)
    }

    /// Record a transition. Moving backwards in the DAG is rejected; siblings
    /// of equal rank may land in any order.
    pub fn advance(&mut self, to: PipelineStage) -> Result<(), StageError> {
        let from = self.current();
        if to != PipelineStage::Failed && to.rank() < from.rank() {
            return Err(StageError::InvalidTransition { from, to });
        }
        tracing::debug!(from = %from, to = %to, "Pipeline stage transition");
        self.entries.push((to, chrono::Utc::now()));
        Ok(())
    }

    /// Mark the run failed, remembering the stage it died in.
    pub fn fail(&mut self) -> PipelineStage {
        let at = self.current();
        self.entries.push((PipelineStage::Failed, chrono::Utc::now()));
        at
    }

    pub fn entries(&self) -> &[(PipelineStage, chrono::DateTime<chrono::Utc>)] {
        &self.entries
    }
}

impl Default for StageLog {
    fn default() -> Self {
        Self::new()
    }
}
