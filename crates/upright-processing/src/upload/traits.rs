//! Traits for the upload pipeline.

use async_trait::async_trait;

/// Media-specific processing (extract metadata, sanitize).
#[async_trait]
pub trait UploadProcessor: Send + Sync {
    type Metadata: Send;

    async fn extract_metadata(&self, data: &[u8]) -> anyhow::Result<Self::Metadata>;
    async fn sanitize(&self, data: Vec<u8>) -> anyhow::Result<Vec<u8>>;
}
