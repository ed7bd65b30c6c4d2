//! Orientation transformer - resamples a raster through the derived affine transform

use image::{DynamicImage, ImageBuffer, Pixel};
use upright_core::{DimensionPolicy, PreprocessError};

use super::transform::AffineTransform;
use crate::metadata::OrientationInfo;

/// Keys cubic convolution parameter (Catmull-Rom).
const BICUBIC_A: f64 = -0.5;

/// Source-space slack when deciding whether a destination pixel center falls inside the source.
const EDGE_EPSILON: f64 = 1e-6;

/// Rewrites decoded pixels into their upright orientation.
pub struct OrientationTransformer {
    policy: DimensionPolicy,
}

impl Default for OrientationTransformer {
    fn default() -> Self {
        Self::new(DimensionPolicy::default())
    }
}

impl OrientationTransformer {
    pub fn new(policy: DimensionPolicy) -> Self {
        Self { policy }
    }

    /// Output raster dimensions for a source raster of `(width, height)`.
    pub fn output_dimensions(&self, width: u32, height: u32, orientation: u8) -> (u32, u32) {
        if self.policy.swaps_dimensions(orientation) {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Resample `img` through the transform derived from `info`.
    ///
    /// The destination keeps the source color model for 8-bit Luma, LumaA, Rgb and Rgba
    /// rasters; anything else is converted to Rgb8 first.
    pub fn transform(
        &self,
        img: &DynamicImage,
        info: &OrientationInfo,
    ) -> Result<DynamicImage, PreprocessError> {
        let transform = AffineTransform::for_orientation(info);
        let inverse = transform.inverse().ok_or_else(|| {
            PreprocessError::Processing(format!(
                "Non-invertible transform for orientation {}",
                info.orientation
            ))
        })?;

        tracing::debug!(
            orientation = info.orientation,
            width = info.width,
            height = info.height,
            transform = ?transform,
            "Applying orientation transform"
        );

        let out = match img {
            DynamicImage::ImageLuma8(buf) => {
                DynamicImage::ImageLuma8(self.resample(buf, &inverse, info.orientation))
            }
            DynamicImage::ImageLumaA8(buf) => {
                DynamicImage::ImageLumaA8(self.resample(buf, &inverse, info.orientation))
            }
            DynamicImage::ImageRgb8(buf) => {
                DynamicImage::ImageRgb8(self.resample(buf, &inverse, info.orientation))
            }
            DynamicImage::ImageRgba8(buf) => {
                DynamicImage::ImageRgba8(self.resample(buf, &inverse, info.orientation))
            }
            other => DynamicImage::ImageRgb8(self.resample(
                &other.to_rgb8(),
                &inverse,
                info.orientation,
            )),
        };

        Ok(out)
    }

    fn resample<P>(
        &self,
        src: &ImageBuffer<P, Vec<u8>>,
        inverse: &AffineTransform,
        orientation: u8,
    ) -> ImageBuffer<P, Vec<u8>>
    where
        P: Pixel<Subpixel = u8>,
    {
        let (src_w, src_h) = src.dimensions();
        let (dst_w, dst_h) = self.output_dimensions(src_w, src_h, orientation);
        let mut dst: ImageBuffer<P, Vec<u8>> = ImageBuffer::new(dst_w, dst_h);

        if src_w == 0 || src_h == 0 {
            return dst;
        }

        let max_x = f64::from(src_w) - 0.5 + EDGE_EPSILON;
        let max_y = f64::from(src_h) - 0.5 + EDGE_EPSILON;
        let channels = usize::from(P::CHANNEL_COUNT);

        for (dx, dy, out) in dst.enumerate_pixels_mut() {
            // Pixel centers sit at +0.5 in continuous coordinates.
            let (cx, cy) = inverse.apply(f64::from(dx) + 0.5, f64::from(dy) + 0.5);
            let (sx, sy) = (cx - 0.5, cy - 0.5);
            if sx < -0.5 - EDGE_EPSILON || sy < -0.5 - EDGE_EPSILON || sx > max_x || sy > max_y
            {
                continue;
            }

            let x0 = sx.floor();
            let y0 = sy.floor();
            let wx = cubic_weights(sx - x0);
            let wy = cubic_weights(sy - y0);

            let mut acc = [0.0f64; 4];
            for (j, wyj) in wy.iter().enumerate() {
                let py = clamp_index(y0 as i64 + j as i64 - 1, src_h);
                for (i, wxi) in wx.iter().enumerate() {
                    let px = clamp_index(x0 as i64 + i as i64 - 1, src_w);
                    let weight = wxi * wyj;
                    let sample = src.get_pixel(px, py).channels();
                    for (c, value) in sample.iter().enumerate().take(channels) {
                        acc[c] += weight * f64::from(*value);
                    }
                }
            }

            for (c, value) in out.channels_mut().iter_mut().enumerate() {
                *value = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }

        dst
    }
}

fn clamp_index(i: i64, len: u32) -> u32 {
    i.clamp(0, i64::from(len) - 1) as u32
}

/// Weights for the taps at offsets -1, 0, 1, 2 from the floor sample.
fn cubic_weights(t: f64) -> [f64; 4] {
    [
        cubic_kernel(t + 1.0),
        cubic_kernel(t),
        cubic_kernel(1.0 - t),
        cubic_kernel(2.0 - t),
    ]
}

fn cubic_kernel(x: f64) -> f64 {
    let x = x.abs();
    let a = BICUBIC_A;
    if x <= 1.0 {
        (a + 2.0) * x * x * x - (a + 3.0) * x * x + 1.0
    } else if x < 2.0 {
        a * x * x * x - 5.0 * a * x * x + 8.0 * a * x - 4.0 * a
    } else {
        0.0
    }
}
