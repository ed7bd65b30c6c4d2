//! JPEG encoder for normalized rasters

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError};
use upright_core::PreprocessError;

/// Encodes rasters as baseline JPEG. No metadata is written, so the output reads back
/// as orientation 1.
pub struct JpegWriter {
    quality: u8,
}

impl JpegWriter {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn encode(&self, img: &DynamicImage) -> Result<Vec<u8>, PreprocessError> {
        // JPEG has no alpha channel
        let flattened;
        let img = match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
            DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_) => {
                flattened = DynamicImage::ImageLuma8(img.to_luma8());
                &flattened
            }
            _ => {
                flattened = DynamicImage::ImageRgb8(img.to_rgb8());
                &flattened
            }
        };

        let (width, height) = (img.width(), img.height());
        let mut buffer = Vec::with_capacity((width * height) as usize / 4);
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        img.write_with_encoder(encoder).map_err(image_error)?;

        Ok(buffer)
    }
}

/// Map an `image` error onto the pipeline taxonomy.
pub(crate) fn image_error(e: ImageError) -> PreprocessError {
    match e {
        ImageError::IoError(io) => PreprocessError::Io(io),
        ImageError::Decoding(d) => PreprocessError::Decode(d.to_string()),
        other => PreprocessError::Processing(other.to_string()),
    }
}
