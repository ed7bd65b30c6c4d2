//! 2D affine transforms and their derivation from Exif orientation codes

use std::f64::consts::PI;

use crate::metadata::OrientationInfo;

/// A 2×3 affine matrix mapping `(x, y)` to
/// `(m00·x + m01·y + m02, m10·x + m11·y + m12)`.
///
/// `scale`, `translate` and `rotate` concatenate onto the right, so the operation
/// appended last is the first one applied to a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            m00: 1.0,
            m01: 0.0,
            m02: 0.0,
            m10: 0.0,
            m11: 1.0,
            m12: 0.0,
        }
    }

    /// `self = self · other`
    pub fn concatenate(&mut self, other: &AffineTransform) {
        let a = *self;
        self.m00 = a.m00 * other.m00 + a.m01 * other.m10;
        self.m01 = a.m00 * other.m01 + a.m01 * other.m11;
        self.m02 = a.m00 * other.m02 + a.m01 * other.m12 + a.m02;
        self.m10 = a.m10 * other.m00 + a.m11 * other.m10;
        self.m11 = a.m10 * other.m01 + a.m11 * other.m11;
        self.m12 = a.m10 * other.m02 + a.m11 * other.m12 + a.m12;
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concatenate(&AffineTransform {
            m00: sx,
            m01: 0.0,
            m02: 0.0,
            m10: 0.0,
            m11: sy,
            m12: 0.0,
        });
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.concatenate(&AffineTransform {
            m00: 1.0,
            m01: 0.0,
            m02: tx,
            m10: 0.0,
            m11: 1.0,
            m12: ty,
        });
    }

    /// Rotate by `theta` radians; positive angles turn the +x axis toward +y
    /// (clockwise on screen, where y grows downward).
    pub fn rotate(&mut self, theta: f64) {
        let (sin, cos) = quadrant_sin_cos(theta);
        self.concatenate(&AffineTransform {
            m00: cos,
            m01: -sin,
            m02: 0.0,
            m10: sin,
            m11: cos,
            m12: 0.0,
        });
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m00 * x + self.m01 * y + self.m02,
            self.m10 * x + self.m11 * y + self.m12,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<AffineTransform> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON {
            return None;
        }
        let m00 = self.m11 / det;
        let m01 = -self.m01 / det;
        let m10 = -self.m10 / det;
        let m11 = self.m00 / det;
        Some(AffineTransform {
            m00,
            m01,
            m02: -(m00 * self.m02 + m01 * self.m12),
            m10,
            m11,
            m12: -(m10 * self.m02 + m11 * self.m12),
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Derive the transform that brings an image with the given orientation upright.
    ///
    /// Offsets use the declared frame dimensions from `info`. Codes outside 1-8 yield
    /// the identity.
    pub fn for_orientation(info: &OrientationInfo) -> AffineTransform {
        let w = f64::from(info.width);
        let h = f64::from(info.height);
        let mut t = AffineTransform::identity();

        match info.orientation {
            2 => {
                t.scale(-1.0, 1.0);
                t.translate(-w, 0.0);
            }
            3 => {
                t.translate(w, h);
                t.rotate(PI);
            }
            4 => {
                t.scale(1.0, -1.0);
                t.translate(0.0, -h);
            }
            5 => {
                t.rotate(-PI / 2.0);
                t.scale(-1.0, 1.0);
            }
            6 => {
                t.translate(h, 0.0);
                t.rotate(PI / 2.0);
            }
            7 => {
                t.scale(-1.0, 1.0);
                t.translate(-h, 0.0);
                t.translate(0.0, w);
                t.rotate(3.0 * PI / 2.0);
            }
            8 => {
                t.translate(0.0, w);
                t.rotate(3.0 * PI / 2.0);
            }
            _ => {}
        }

        t
    }
}

/// sin/cos with exact values on multiples of a quarter turn.
fn quadrant_sin_cos(theta: f64) -> (f64, f64) {
    let quarters = theta / (PI / 2.0);
    let rounded = quarters.round();
    if (quarters - rounded).abs() < 1e-12 {
        match (rounded as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        theta.sin_cos()
    }
}
