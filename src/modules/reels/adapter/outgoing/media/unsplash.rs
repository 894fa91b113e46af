use async_trait::async_trait;

use crate::reels::application::ports::outgoing::{StockPhotoError, StockPhotoFinder};

const SOURCE_BASE: &str = "https://source.unsplash.com/featured";

/// Unsplash Source lookup: no API key, one random featured photo per query.
/// The redirect target is resolved by whoever downloads the URL.
#[derive(Clone, Default)]
pub struct UnsplashSourceFinder;

impl UnsplashSourceFinder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StockPhotoFinder for UnsplashSourceFinder {
    async fn find(&self, query: &str) -> Result<String, StockPhotoError> {
        if query.trim().is_empty() {
            return Err(StockPhotoError::Lookup("empty query".to_string()));
        }
        Ok(format!("{SOURCE_BASE}/?{query}"))
    }
}
