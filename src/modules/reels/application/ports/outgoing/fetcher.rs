use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Could not write downloaded file: {0}")]
    Io(String),
}

/// Streams a remote URL into a local file and reports the byte count.
///
/// Callers own validation of what arrived (existence is guaranteed on `Ok`,
/// minimum sizes are a caller concern).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}
