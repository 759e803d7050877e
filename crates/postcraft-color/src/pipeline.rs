//! Filter pipeline: a preset followed by manual adjustments.

use image::RgbaImage;
use postcraft_core::{FilterAdjustments, FilterSettings};
use rayon::prelude::*;
use tracing::warn;

use crate::ops::FilterOp;
use crate::presets::FilterPreset;

/// An ordered chain of filter operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPipeline {
    pub ops: Vec<FilterOp>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a preset and adjustments.
    pub fn build(preset: FilterPreset, adjustments: &FilterAdjustments) -> Self {
        let mut ops = preset.ops().to_vec();
        ops.extend(
            [
                FilterOp::Brightness(adjustments.brightness),
                FilterOp::Contrast(adjustments.contrast),
                FilterOp::Saturate(adjustments.saturation),
                FilterOp::HueRotate(adjustments.hue_rotate),
            ]
            .into_iter()
            .filter(|op| !op.is_identity()),
        );
        Self { ops }
    }

    /// Build from edit metadata. Unknown preset names fall back to
    /// `original` so a stale document still previews.
    pub fn from_settings(settings: &FilterSettings) -> Self {
        let preset = settings.preset.parse().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to the original look");
            FilterPreset::Original
        });
        Self::build(preset, &settings.adjustments)
    }

    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| op.is_identity())
    }

    /// Process a single pixel through the pipeline.
    pub fn process_pixel(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.ops.iter().fold(rgb, |px, op| op.apply(px))
    }

    /// Filter an RGBA8 frame in place. Alpha is left untouched.
    pub fn apply_rgba(&self, frame: &mut RgbaImage) {
        if self.is_identity() {
            return;
        }
        let row_bytes = frame.width() as usize * 4;
        if row_bytes == 0 {
            return;
        }
        frame.par_chunks_mut(row_bytes).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                let rgb = [
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                ];
                let out = self.process_pixel(rgb);
                for (dst, v) in px.iter_mut().zip(out) {
                    *dst = (v * 255.0).round() as u8;
                }
            }
        });
    }

    /// The CSS `filter` property value, `none` when nothing applies.
    pub fn css(&self) -> String {
        let parts: Vec<String> = self
            .ops
            .iter()
            .filter(|op| !op.is_identity())
            .map(ToString::to_string)
            .collect();
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }
}
