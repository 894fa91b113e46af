use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ImageGenerationError {
    #[error("Image generation failed: {0}")]
    Request(String),

    #[error("Image generation returned no image URL")]
    NoImageUrl,
}

/// AI image-generation collaborator: prompt in, downloadable image URL out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError>;
}
