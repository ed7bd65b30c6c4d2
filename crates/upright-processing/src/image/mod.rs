//! Image orientation pipeline
//!
//! - Metadata extraction: Exif orientation and frame dimensions (reader)
//! - Transform derivation from orientation codes (transform)
//! - Bicubic resampling into the upright raster (resample)
//! - JPEG re-encoding (encoder)
//! - Format gate and fallback orchestration (preprocessor)

pub mod encoder;
pub mod preprocessor;
pub mod reader;
pub mod resample;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use encoder::JpegWriter;
pub use preprocessor::ImagePreprocessor;
pub use reader::MetadataReader;
pub use resample::OrientationTransformer;
pub use transform::AffineTransform;
