//! CSS filter functions as per-pixel operations.
//!
//! Matrices follow the Filter Effects Module Level 1 definitions. Every
//! operation clamps its output to `[0, 1]`, as chained CSS filters do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single CSS-equivalent filter function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "amount", rename_all = "kebab-case")]
pub enum FilterOp {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    /// Degrees.
    HueRotate(f32),
    Sepia(f32),
    Grayscale(f32),
}

impl FilterOp {
    /// Apply to one unpremultiplied sRGB pixel.
    pub fn apply(self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match self {
            Self::Brightness(b) => rgb.map(|c| c * b),
            Self::Contrast(k) => rgb.map(|c| (c - 0.5) * k + 0.5),
            Self::Saturate(s) => mat3_mul(&saturate_matrix(s), rgb),
            Self::HueRotate(deg) => mat3_mul(&hue_rotate_matrix(deg), rgb),
            Self::Sepia(a) => mat3_mul(&sepia_matrix(a), rgb),
            Self::Grayscale(a) => mat3_mul(&grayscale_matrix(a), rgb),
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }

    pub fn is_identity(self) -> bool {
        match self {
            Self::Brightness(v) | Self::Contrast(v) | Self::Saturate(v) => v == 1.0,
            Self::HueRotate(v) | Self::Sepia(v) | Self::Grayscale(v) => v == 0.0,
        }
    }
}

/// Renders as the CSS function, e.g. `hue-rotate(-20deg)`.
impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness(v) => write!(f, "brightness({v})"),
            Self::Contrast(v) => write!(f, "contrast({v})"),
            Self::Saturate(v) => write!(f, "saturate({v})"),
            Self::HueRotate(v) => write!(f, "hue-rotate({v}deg)"),
            Self::Sepia(v) => write!(f, "sepia({v})"),
            Self::Grayscale(v) => write!(f, "grayscale({v})"),
        }
    }
}

fn mat3_mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn saturate_matrix(s: f32) -> [[f32; 3]; 3] {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(deg: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = deg.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn sepia_matrix(amount: f32) -> [[f32; 3]; 3] {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn grayscale_matrix(amount: f32) -> [[f32; 3]; 3] {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}
