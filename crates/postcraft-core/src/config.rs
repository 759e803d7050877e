//! Preview configuration: gesture limits, playback timing, fallbacks.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::easing::CubicBezier;
use crate::error::{PostcraftError, Result};

/// Default values, shared by `PreviewConfig::default` and callers that
/// only need a constant.
pub mod defaults {
    /// Smallest overlay width/height after a resize, in percent.
    pub const OVERLAY_MIN_PERCENT: f32 = 5.0;

    /// Smallest footer width, in percent of the canvas.
    pub const FOOTER_MIN_WIDTH_PERCENT: f32 = 10.0;

    /// Smallest footer height, in percent of the canvas.
    pub const FOOTER_MIN_HEIGHT_PERCENT: f32 = 5.0;

    /// Tallest footer, in percent of the canvas.
    pub const FOOTER_MAX_HEIGHT_PERCENT: f32 = 50.0;

    /// Delay between the offset snap and the start of the entrance transition.
    pub const ANIMATE_DELAY_MS: u64 = 50;

    /// Mask video drift that triggers a forced re-sync, in seconds.
    pub const DRIFT_TOLERANCE_SECS: f64 = 0.2;

    /// Side of a square resize handle's hit area, in pixels.
    pub const HANDLE_HIT_PX: f32 = 10.0;
}

/// Overlay and footer size floors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_w: f32,
    pub min_h: f32,
    pub max_h: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewConfig {
    pub overlay_min_percent: f32,
    pub footer_min_width_percent: f32,
    pub footer_min_height_percent: f32,
    pub footer_max_height_percent: f32,
    pub animate_delay_ms: u64,
    pub drift_tolerance_secs: f64,
    /// Background used when dominant-color sampling fails.
    pub fallback_color: Color,
    pub handle_hit_px: f32,
    pub transition_easing: CubicBezier,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            overlay_min_percent: defaults::OVERLAY_MIN_PERCENT,
            footer_min_width_percent: defaults::FOOTER_MIN_WIDTH_PERCENT,
            footer_min_height_percent: defaults::FOOTER_MIN_HEIGHT_PERCENT,
            footer_max_height_percent: defaults::FOOTER_MAX_HEIGHT_PERCENT,
            animate_delay_ms: defaults::ANIMATE_DELAY_MS,
            drift_tolerance_secs: defaults::DRIFT_TOLERANCE_SECS,
            fallback_color: Color::BLACK,
            handle_hit_px: defaults::HANDLE_HIT_PX,
            transition_easing: CubicBezier::ENTRANCE,
        }
    }
}

impl PreviewConfig {
    pub fn overlay_limits(&self) -> SizeLimits {
        SizeLimits {
            min_w: self.overlay_min_percent,
            min_h: self.overlay_min_percent,
            max_h: 100.0,
        }
    }

    pub fn footer_limits(&self) -> SizeLimits {
        SizeLimits {
            min_w: self.footer_min_width_percent,
            min_h: self.footer_min_height_percent,
            max_h: self
                .footer_max_height_percent
                .max(self.footer_min_height_percent),
        }
    }

    pub fn animate_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.animate_delay_ms)
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| PostcraftError::Serialization(format!("Invalid preview config: {}", e)))
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}
