//! Orientation metadata extracted from an image

use serde::{Deserialize, Serialize};

/// Orientation code plus the frame dimensions declared by the image header.
///
/// `width`/`height` are the pre-transform dimensions from the start-of-frame
/// segment, independent of the decoded raster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationInfo {
    pub orientation: u8,
    pub width: u32,
    pub height: u32,
}

impl OrientationInfo {
    /// Orientation code meaning "already upright".
    pub const IDENTITY: u8 = 1;

    pub fn new(orientation: u8, width: u32, height: u32) -> Self {
        Self {
            orientation,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_info_serialization() {
        let info = OrientationInfo::new(6, 800, 600);

        let json = serde_json::to_string(&info).unwrap();
        let deserialized: OrientationInfo = serde_json::from_str(&json).unwrap();

        assert_eq!(info, deserialized);
        assert!(json.contains("\"orientation\":6"));
    }
}
