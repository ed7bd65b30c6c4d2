//! Upright Image Preprocessing Library
//!
//! This crate normalizes uploaded JPEG images to their canonical upright orientation.
//! The pipeline reads the Exif orientation code and the frame dimensions, derives the
//! matching affine transform, resamples the pixels and re-encodes them. Any failure
//! falls back to the original bytes.

pub mod chain;
pub mod file;
pub mod image;
pub mod metadata;
pub mod traits;
pub mod upload;

// Re-export commonly used types
pub use chain::PreprocessorChain;
pub use file::MediaFile;
pub use crate::image::{
    AffineTransform, ImagePreprocessor, JpegWriter, MetadataReader, OrientationTransformer,
};
pub use metadata::OrientationInfo;
pub use traits::FilePreprocessor;
pub use upload::{ImageUploadProcessor, UploadProcessor};
pub use upright_core::{DimensionPolicy, PreprocessError, PreprocessorConfig};
