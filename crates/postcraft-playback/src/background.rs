//! Dominant-color sampling of the primary media's first frame.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use postcraft_core::Color;
use tracing::warn;

use crate::error::MediaError;

/// Average color of a frame, from a 1x1 downscale.
///
/// Fully transparent pixels carry no color, so a frame without any opaque
/// content is reported as a sampling failure.
pub fn dominant_color(frame: &RgbaImage) -> Result<Color, MediaError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(MediaError::Sampling("empty frame".into()));
    }
    let px = imageops::resize(frame, 1, 1, FilterType::Triangle);
    let [r, g, b, a] = px.get_pixel(0, 0).0;
    if a == 0 {
        return Err(MediaError::Sampling("frame is fully transparent".into()));
    }
    Ok(Color::from_rgba8(r, g, b, 255))
}

/// The live background color: the sampled color, or `fallback` when the
/// frame could not be read.
pub fn background_color(frame: Result<&RgbaImage, MediaError>, fallback: Color) -> Color {
    match frame.and_then(dominant_color) {
        Ok(color) => color,
        Err(e) => {
            warn!(error = %e, fallback = %fallback, "Using fallback background color");
            fallback
        }
    }
}
