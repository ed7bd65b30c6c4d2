//! Image upload processor: orientation metadata + upright normalization.

use std::sync::Arc;

use async_trait::async_trait;
use upright_core::PreprocessorConfig;

use crate::image::{ImagePreprocessor, MetadataReader};
use crate::metadata::OrientationInfo;
use crate::upload::traits::UploadProcessor;

/// Image upload processor.
pub struct ImageUploadProcessor {
    preprocessor: Arc<ImagePreprocessor>,
}

impl ImageUploadProcessor {
    pub fn new(config: &PreprocessorConfig) -> Self {
        Self {
            preprocessor: Arc::new(ImagePreprocessor::new(config)),
        }
    }
}

#[async_trait]
impl UploadProcessor for ImageUploadProcessor {
    type Metadata = OrientationInfo;

    async fn extract_metadata(&self, data: &[u8]) -> anyhow::Result<OrientationInfo> {
        let data = data.to_vec();
        let info = tokio::task::spawn_blocking(move || MetadataReader::read(&data)).await??;
        Ok(info)
    }

    /// Never fails on image content; only a panicked worker surfaces as an error.
    async fn sanitize(&self, data: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        let preprocessor = Arc::clone(&self.preprocessor);
        // Decode and resampling are CPU-bound; run off the async pool.
        let out = tokio::task::spawn_blocking(move || preprocessor.preprocess(&data)).await?;
        Ok(out)
    }
}
