//! Image preprocessor - format gate and orientation pipeline with fallback
//!
//! The pipeline runs read metadata → decode → transform → encode. Every failure is
//! caught once, here, logged with its category, and turned into "return the original
//! bytes". Callers never see an error.

use image::ImageFormat;
use upright_core::{PreprocessError, PreprocessorConfig};

use super::encoder::{image_error, JpegWriter};
use super::reader::MetadataReader;
use super::resample::OrientationTransformer;
use crate::file::MediaFile;
use crate::traits::FilePreprocessor;

/// Normalizes JPEG uploads to their upright orientation.
pub struct ImagePreprocessor {
    config: PreprocessorConfig,
    transformer: OrientationTransformer,
    writer: JpegWriter,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new(&PreprocessorConfig::default())
    }
}

impl ImagePreprocessor {
    pub fn new(config: &PreprocessorConfig) -> Self {
        Self {
            config: config.clone(),
            transformer: OrientationTransformer::new(config.dimension_policy),
            writer: JpegWriter::new(config.jpeg_quality),
        }
    }

    /// Whether this preprocessor handles the declared MIME type.
    pub fn supports(&self, mime: &str) -> bool {
        self.config.accepts_mime(mime)
    }

    /// Run the pipeline, returning the original bytes on any failure.
    pub fn preprocess(&self, input: &[u8]) -> Vec<u8> {
        match self.try_preprocess(input) {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(
                    category = %e.category(),
                    error = %e,
                    "{}! Fallback to original image bytes",
                    e.context_message()
                );
                input.to_vec()
            }
        }
    }

    /// The fallible pipeline behind [`preprocess`](Self::preprocess).
    pub fn try_preprocess(&self, input: &[u8]) -> Result<Vec<u8>, PreprocessError> {
        let info = MetadataReader::read(input)?;
        let img = image::load_from_memory_with_format(input, ImageFormat::Jpeg)
            .map_err(image_error)?;
        let upright = self.transformer.transform(&img, &info)?;
        let output = self.writer.encode(&upright)?;

        tracing::debug!(
            orientation = info.orientation,
            width = upright.width(),
            height = upright.height(),
            input_bytes = input.len(),
            output_bytes = output.len(),
            "Image normalized"
        );

        Ok(output)
    }
}

impl FilePreprocessor for ImagePreprocessor {
    fn name(&self) -> &'static str {
        "ImagePreprocessor"
    }

    fn accept(&self, file: &mut MediaFile) {
        if !self.supports(&file.mime) {
            tracing::info!(
                preprocessor = self.name(),
                file = %file.name,
                mime = %file.mime,
                "Preprocessor does not apply to file"
            );
            return;
        }

        if self.config.exceeds_input_limit(file.size_bytes()) {
            tracing::info!(
                preprocessor = self.name(),
                file = %file.name,
                size_bytes = file.size_bytes(),
                max_bytes = self.config.max_input_bytes,
                "File exceeds preprocessing size limit, leaving it untouched"
            );
            return;
        }

        let output = self.preprocess(&file.data);
        file.data = output;
    }
}
