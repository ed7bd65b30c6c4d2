//! JPEG fixtures for unit tests

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;

/// Gradient image encoded as a JPEG without any Exif segment.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, 90)
        .encode_image(&img)
        .unwrap();
    buffer
}

/// Big-endian TIFF block holding a single IFD0 entry: Orientation (SHORT).
pub fn orientation_tiff(orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::with_capacity(26);
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());
    tiff
}

pub fn jpeg_with_tiff(width: u32, height: u32, tiff: Vec<u8>) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(jpeg_bytes(width, height))).unwrap();
    jpeg.set_exif(Some(Bytes::from(tiff)));
    jpeg.encoder().bytes().to_vec()
}

pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    jpeg_with_tiff(width, height, orientation_tiff(orientation))
}
