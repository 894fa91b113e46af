use async_trait::async_trait;

// ============================================================================
// Command Types
// ============================================================================

/// One chat-completion call: a fixed system instruction plus the user prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TextGenerationError {
    #[error("Text generation request failed: {0}")]
    Request(String),

    #[error("Text generation returned an empty completion")]
    EmptyCompletion,
}

// ============================================================================
// Port Interface
// ============================================================================

/// Text-generation collaborator (chat completions).
///
/// No retry here; if retries are wanted they belong inside the adapter's own
/// client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, TextGenerationError>;
}
