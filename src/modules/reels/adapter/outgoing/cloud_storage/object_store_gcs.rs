use async_trait::async_trait;
use google_cloud_storage::{
    client::{Client, ClientConfig},
    http::objects::upload::{Media, UploadObjectRequest, UploadType},
};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::reels::application::ports::outgoing::{ObjectStore, ObjectStoreError};

fn map_upload_error(msg: &str) -> ObjectStoreError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        ObjectStoreError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        ObjectStoreError::BucketNotFound
    } else {
        ObjectStoreError::Upload(msg.to_string())
    }
}

/// Internal seam so the adapter is testable without mocking
/// google-cloud-storage types.
#[async_trait]
trait GcsApi: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String>;
}

struct RealGcsApi {
    client: Client,
}

impl RealGcsApi {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config = ClientConfig::default().with_auth().await?;
        Ok(Self {
            client: Client::new(config),
        })
    }
}

#[async_trait]
impl GcsApi for RealGcsApi {
    async fn put_object(
        &self,
        bucket: &str,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        let upload_type = UploadType::Simple(Media {
            name: name.to_string().into(),
            content_type: content_type.to_string().into(),
            content_length: Some(data.len() as u64),
        });

        self.client
            .upload_object(
                &UploadObjectRequest {
                    bucket: bucket.to_string(),
                    ..Default::default()
                },
                data,
                &upload_type,
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

/// Production adapter: media artifacts go to one GCS bucket and are served
/// from its public URL space.
#[derive(Clone)]
pub struct GcsObjectStore {
    api: Arc<OnceCell<Box<dyn GcsApi>>>,
    bucket: String,
    public_base_url: String,
}

impl GcsObjectStore {
    /// Synchronous constructor; the client is initialized lazily on first
    /// upload.
    pub fn new(bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let public_base_url = format!("https://storage.googleapis.com/{bucket}");

        Self {
            api: Arc::new(OnceCell::new()),
            bucket,
            public_base_url,
        }
    }

    async fn api(&self) -> Result<&dyn GcsApi, ObjectStoreError> {
        self.api
            .get_or_try_init(|| async {
                let api = RealGcsApi::new().await.map_err(|e| {
                    ObjectStoreError::Upload(format!("client initialization failed: {e}"))
                })?;
                Ok(Box::new(api) as Box<dyn GcsApi>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    #[cfg(test)]
    fn with_api(api: Box<dyn GcsApi>, bucket: &str, public_base_url: &str) -> Self {
        let once = OnceCell::new();
        let _ = once.set(api);

        Self {
            api: Arc::new(once),
            bucket: bucket.to_string(),
            public_base_url: public_base_url.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        let api = self.api().await?;

        api.put_object(&self.bucket, key, bytes, content_type)
            .await
            .map_err(|e| map_upload_error(&e))?;

        tracing::debug!(bucket = %self.bucket, key, "Object uploaded");
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
