//! Upload adapter: run the orientation pipeline from async upload handlers.

pub mod image_processor;
pub mod traits;

pub use image_processor::ImageUploadProcessor;
pub use traits::UploadProcessor;
