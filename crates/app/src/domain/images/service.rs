//! Images service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{backend::BackendClient, domain::images::errors::ImagesServiceError};

#[derive(Debug, Clone)]
pub struct HttpImagesService {
    backend: BackendClient,
    bucket: String,
}

impl HttpImagesService {
    #[must_use]
    pub fn new(backend: BackendClient, bucket: impl Into<String>) -> Self {
        Self {
            backend,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ImagesService for HttpImagesService {
    async fn upload(
        &self,
        path: String,
        bytes: Vec<u8>,
        content_type: String,
    ) -> Result<String, ImagesServiceError> {
        self.backend
            .upload(&self.bucket, &path, bytes, &content_type)
            .await?;

        info!(bucket = %self.bucket, path, "uploaded image");

        Ok(self.backend.public_url(&self.bucket, &path))
    }
}

#[automock]
#[async_trait]
pub trait ImagesService: Send + Sync {
    /// Store an image at `path` and return its public URL.
    async fn upload(
        &self,
        path: String,
        bytes: Vec<u8>,
        content_type: String,
    ) -> Result<String, ImagesServiceError>;
}
