use async_trait::async_trait;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ObjectStoreError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Bucket not found")]
    BucketNotFound,

    #[error("Storage upload failed: {0}")]
    Upload(String),
}

// ============================================================================
// Port Interface
// ============================================================================

/// Durable object storage.
///
/// Implementations write the bytes under `key` and return a stable public
/// URL. No local side effects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, ObjectStoreError>;
}
