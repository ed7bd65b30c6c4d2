//! Metadata reader - Exif orientation and start-of-frame dimensions

use bytes::Bytes;
use exif::{In, Tag};
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;
use upright_core::PreprocessError;

use crate::metadata::OrientationInfo;

/// Start-of-frame markers carry frame dimensions; 0xC4 (DHT), 0xC8 (JPG) and 0xCC (DAC)
/// share the range but are not frames.
fn is_start_of_frame(marker: u8) -> bool {
    (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

/// Whether the stream ends with an end-of-image marker (`FF D9`). Trailing `00`/`FF`
/// padding after the marker is tolerated. Entropy-coded data stuffs every `FF` byte,
/// so a stream cut inside its scan data cannot end on this marker.
fn has_end_of_image(data: &[u8]) -> bool {
    let end = data
        .iter()
        .rposition(|&b| b != 0x00 && b != 0xFF)
        .map_or(0, |i| i + 1);
    end >= 2 && data[end - 2..end] == [0xFF, 0xD9]
}

/// Reads orientation and declared frame dimensions from JPEG bytes.
pub struct MetadataReader;

impl MetadataReader {
    /// Read `OrientationInfo` from raw JPEG bytes.
    ///
    /// A missing or unreadable orientation is not fatal and yields orientation 1.
    /// A missing or malformed start-of-frame segment, or a stream without its
    /// end-of-image marker, is a decode error.
    pub fn read(data: &[u8]) -> Result<OrientationInfo, PreprocessError> {
        if !has_end_of_image(data) {
            return Err(PreprocessError::Decode(
                "JPEG stream is truncated: missing end-of-image marker".to_string(),
            ));
        }

        let jpeg = Jpeg::from_bytes(Bytes::copy_from_slice(data))
            .map_err(|e| PreprocessError::Decode(format!("Invalid JPEG structure: {}", e)))?;

        let (width, height) = Self::frame_dimensions(&jpeg)?;
        let orientation = match Self::orientation(&jpeg) {
            Ok(orientation) => orientation,
            Err(e) => {
                tracing::warn!(
                    category = %e.category(),
                    error = %e,
                    "Could not get orientation, assuming upright"
                );
                OrientationInfo::IDENTITY
            }
        };

        Ok(OrientationInfo::new(orientation, width, height))
    }

    /// Width and height from the first start-of-frame segment.
    fn frame_dimensions(jpeg: &Jpeg) -> Result<(u32, u32), PreprocessError> {
        let segment = jpeg
            .segments()
            .iter()
            .find(|s| is_start_of_frame(s.marker()))
            .ok_or_else(|| {
                PreprocessError::Decode("JPEG has no start-of-frame segment".to_string())
            })?;

        let contents = segment.contents();
        if contents.len() < 5 {
            return Err(PreprocessError::Decode(format!(
                "Start-of-frame segment too short: {} bytes",
                contents.len()
            )));
        }

        let height = u32::from(u16::from_be_bytes([contents[1], contents[2]]));
        let width = u32::from(u16::from_be_bytes([contents[3], contents[4]]));
        if width == 0 || height == 0 {
            return Err(PreprocessError::Decode(format!(
                "Invalid frame dimensions {}x{}",
                width, height
            )));
        }

        Ok((width, height))
    }

    /// Orientation tag of the primary IFD.
    fn orientation(jpeg: &Jpeg) -> Result<u8, PreprocessError> {
        let raw = jpeg.exif().ok_or_else(|| {
            PreprocessError::Metadata("Exif data of provided image is empty".to_string())
        })?;

        let exif = exif::Reader::new()
            .read_raw(raw.to_vec())
            .map_err(|e| PreprocessError::Metadata(format!("Unreadable Exif data: {}", e)))?;

        let field = exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .ok_or_else(|| {
                PreprocessError::Metadata("Exif data has no orientation tag".to_string())
            })?;

        let value = field.value.get_uint(0).ok_or_else(|| {
            PreprocessError::Metadata(format!(
                "Orientation tag has unexpected type: {:?}",
                field.value
            ))
        })?;

        match u8::try_from(value) {
            Ok(code @ 1..=8) => Ok(code),
            _ => Err(PreprocessError::Metadata(format!(
                "Orientation value {} out of range",
                value
            ))),
        }
    }
}
