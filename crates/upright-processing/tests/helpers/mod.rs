//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;

pub const RED: Rgb<u8> = Rgb([220, 20, 20]);
pub const GREEN: Rgb<u8> = Rgb([20, 200, 20]);
pub const BLUE: Rgb<u8> = Rgb([20, 20, 220]);
pub const WHITE: Rgb<u8> = Rgb([240, 240, 240]);

/// Image split into four solid quadrants: red, green on top; blue, white below.
pub fn quadrant_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        match (x < width / 2, y < height / 2) {
            (true, true) => RED,
            (false, true) => GREEN,
            (true, false) => BLUE,
            (false, false) => WHITE,
        }
    })
}

pub fn encode_jpeg(img: &RgbImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, 95)
        .encode_image(img)
        .unwrap();
    buffer
}

/// Big-endian TIFF block with a single IFD0 Orientation entry.
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

pub fn with_orientation(jpeg_bytes: Vec<u8>, orientation: u16) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(jpeg_bytes)).unwrap();
    jpeg.set_exif(Some(Bytes::from(orientation_tiff(orientation))));
    jpeg.encoder().bytes().to_vec()
}

pub fn quadrant_jpeg(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    with_orientation(encode_jpeg(&quadrant_image(width, height)), orientation)
}

/// Channel-wise closeness, tolerant of JPEG artifacts.
pub fn assert_close(actual: Rgb<u8>, expected: Rgb<u8>, at: (u32, u32)) {
    for c in 0..3 {
        let diff = (i32::from(actual[c]) - i32::from(expected[c])).abs();
        assert!(
            diff <= 24,
            "pixel {:?}: expected {:?}, got {:?}",
            at,
            expected,
            actual
        );
    }
}

/// Colors at the centers of the four quadrants: top-left, top-right, bottom-left, bottom-right.
pub fn quadrant_centers(img: &RgbImage) -> [Rgb<u8>; 4] {
    let (w, h) = img.dimensions();
    [
        *img.get_pixel(w / 4, h / 4),
        *img.get_pixel(3 * w / 4, h / 4),
        *img.get_pixel(w / 4, 3 * h / 4),
        *img.get_pixel(3 * w / 4, 3 * h / 4),
    ]
}
