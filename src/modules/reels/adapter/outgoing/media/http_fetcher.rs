use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::reels::application::ports::outgoing::{ArtifactFetcher, FetchError};

/// Streams HTTP downloads straight to disk, chunk by chunk, and reports how
/// many bytes landed.
#[derive(Clone, Default)]
pub struct HttpArtifactFetcher {
    http: Client,
}

impl HttpArtifactFetcher {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let download_err = |reason: String| FetchError::Download {
            url: url.to_string(),
            reason,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| download_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| download_err(e.to_string()))?;

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| download_err(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::Io(e.to_string()))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        tracing::debug!(url, bytes = written, "Artifact downloaded");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_rejects_malformed_url_without_touching_disk() {
        let dest = std::env::temp_dir().join("fetcher-bad-url-test");
        let err = HttpArtifactFetcher::new()
            .fetch("not a url", &dest)
            .await
            .unwrap_err();

        match err {
            FetchError::Download { url, .. } => assert_eq!(url, "not a url"),
            other => panic!("Expected Download error, got: {other:?}"),
        }
        assert!(!dest.exists());
    }
}
