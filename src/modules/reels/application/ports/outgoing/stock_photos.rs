use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StockPhotoError {
    #[error("Stock photo lookup failed: {0}")]
    Lookup(String),
}

/// Stock-photo search collaborator.
///
/// Best-effort: the returned URL may point at a low-relevance image, and the
/// download behind it may still fail. Sourcing tiers validate what actually
/// lands on disk.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockPhotoFinder: Send + Sync {
    async fn find(&self, query: &str) -> Result<String, StockPhotoError>;
}
