use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Speech synthesis returned no audio")]
    EmptyAudio,
}

/// Speech-synthesis collaborator: sanitized script in, MP3 bytes out.
///
/// No chunking: a script over the collaborator's length limit surfaces as
/// the collaborator's own error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError>;
}
