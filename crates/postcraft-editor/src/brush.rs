//! Soft-edge brush painting on an avatar overlay.

use postcraft_core::geometry::px_to_percent;
use postcraft_core::{Rect, SoftEdgeConfig, Stroke, Vec2};

/// Brush parameters captured when a paint gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    /// Radius in percent of the overlay's shorter side.
    pub size: f32,
    pub blur: f32,
    pub opacity: f32,
}

impl From<&SoftEdgeConfig> for BrushSettings {
    fn from(cfg: &SoftEdgeConfig) -> Self {
        Self {
            size: cfg.brush_size,
            blur: cfg.blur_strength,
            opacity: cfg.opacity,
        }
    }
}

/// A pointer-down paint gesture over one overlay.
#[derive(Debug, Clone)]
pub struct BrushSession {
    pub overlay_id: String,
    overlay_px: Rect,
    settings: BrushSettings,
    strokes_painted: usize,
}

impl BrushSession {
    pub fn begin(overlay_id: impl Into<String>, overlay_px: Rect, settings: BrushSettings) -> Self {
        Self {
            overlay_id: overlay_id.into(),
            overlay_px,
            settings,
            strokes_painted: 0,
        }
    }

    /// The stroke for one pointer move, in percent of the overlay box.
    pub fn stroke_at(&mut self, pointer: Vec2) -> Stroke {
        self.strokes_painted += 1;
        let local = pointer - self.overlay_px.min();
        Stroke::new(
            px_to_percent(local.x, self.overlay_px.width),
            px_to_percent(local.y, self.overlay_px.height),
            self.settings.size,
            self.settings.blur,
            self.settings.opacity,
        )
    }

    pub fn strokes_painted(&self) -> usize {
        self.strokes_painted
    }
}

/// The circular brush outline that follows the pointer over a feathering
/// avatar, painting or not.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushCursor {
    pub overlay_id: String,
    pub center: Vec2,
    pub radius_px: f32,
}

impl BrushCursor {
    pub fn new(overlay_id: impl Into<String>, overlay_px: Rect, center: Vec2, brush_size: f32) -> Self {
        let short = overlay_px.width.min(overlay_px.height);
        Self {
            overlay_id: overlay_id.into(),
            center,
            radius_px: brush_size / 100.0 * short,
        }
    }
}
