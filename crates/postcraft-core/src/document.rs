//! Template documents and the partial updates the editor emits against them.
//!
//! Uses camelCase JSON so documents round-trip with the web host unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Color;
use crate::error::{PostcraftError, Result};
use crate::footer::{FooterConfig, FooterGeometry};
use crate::geometry::PercentRect;
use crate::layout::{AspectRatio, CanvasSettings};
use crate::overlay::{AnimationSpec, OverlayElement};
use crate::strokes::Stroke;

// ── Template metadata ──────────────────────────────────────────

/// Overlay list, footer and canvas of one template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateMetadata {
    pub canvas: CanvasSettings,
    pub overlays: Vec<OverlayElement>,
    pub footer_config: FooterConfig,
}

impl TemplateMetadata {
    pub fn overlay(&self, id: &str) -> Option<&OverlayElement> {
        self.overlays.iter().find(|o| o.id == id)
    }

    pub fn overlay_mut(&mut self, id: &str) -> Option<&mut OverlayElement> {
        self.overlays.iter_mut().find(|o| o.id == id)
    }

    /// Visible overlays in paint order (first is bottom-most).
    pub fn visible_overlays(&self) -> impl DoubleEndedIterator<Item = &OverlayElement> {
        self.overlays.iter().filter(|o| o.visible)
    }

    /// Merge one partial overlay update.
    pub fn apply_overlay_patch(&mut self, id: &str, patch: OverlayPatch) -> Result<()> {
        let overlay = self
            .overlay_mut(id)
            .ok_or_else(|| PostcraftError::NotFound(id.to_string()))?;
        debug!(id, ?patch, "Applying overlay patch");
        match patch {
            OverlayPatch::Geometry(geometry) => overlay.geometry = geometry,
            OverlayPatch::Visible(visible) => overlay.visible = visible,
            OverlayPatch::Animation(animation) => overlay.animation = animation,
            OverlayPatch::AppendStroke(stroke) => {
                soft_edge_of(overlay)?.strokes.append(stroke);
            }
            OverlayPatch::ResetStrokes => soft_edge_of(overlay)?.strokes.reset(),
            OverlayPatch::TruncateStrokes(len) => soft_edge_of(overlay)?.strokes.truncate_to(len),
            OverlayPatch::SoftEdge(settings) => {
                let cfg = soft_edge_of(overlay)?;
                cfg.enabled = settings.enabled;
                cfg.brush_size = settings.brush_size;
                cfg.blur_strength = settings.blur_strength;
                cfg.opacity = settings.opacity;
            }
        }
        Ok(())
    }

    /// Merge one partial footer update.
    pub fn apply_footer_patch(&mut self, patch: FooterPatch) {
        debug!(?patch, "Applying footer patch");
        match patch {
            FooterPatch::Geometry(geometry) => self.footer_config.set_geometry(geometry),
            FooterPatch::Enabled(enabled) => self.footer_config.set_enabled(enabled),
            FooterPatch::BackgroundColor(color) => self.footer_config.background_color = color,
        }
    }
}

fn soft_edge_of(overlay: &mut OverlayElement) -> Result<&mut crate::overlay::SoftEdgeConfig> {
    let id = overlay.id.clone();
    overlay.soft_edge_mut().ok_or_else(|| {
        PostcraftError::InvalidParameter(format!("overlay {id} has no soft-edge mask"))
    })
}

// ── Partial updates ────────────────────────────────────────────

/// Brush parameters without the stroke history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftEdgeSettings {
    pub enabled: bool,
    pub brush_size: f32,
    pub blur_strength: f32,
    pub opacity: f32,
}

/// A partial update to one overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum OverlayPatch {
    Geometry(PercentRect),
    Visible(bool),
    Animation(AnimationSpec),
    AppendStroke(Stroke),
    ResetStrokes,
    TruncateStrokes(usize),
    SoftEdge(SoftEdgeSettings),
}

/// A partial update to the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum FooterPatch {
    Geometry(FooterGeometry),
    Enabled(bool),
    BackgroundColor(Option<Color>),
}

// ── Edit metadata ──────────────────────────────────────────────

/// Pan of the crop window, in percent of the available slack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropPosition {
    pub x: f32,
    pub y: f32,
}

impl Default for CropPosition {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropSettings {
    pub ratio: AspectRatio,
    pub zoom_level: f32,
    pub position: CropPosition,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            ratio: AspectRatio::Original,
            zoom_level: 1.0,
            position: CropPosition::default(),
        }
    }
}

/// Manual color adjustments applied after the preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterAdjustments {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    /// Degrees.
    pub hue_rotate: f32,
}

impl Default for FilterAdjustments {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            hue_rotate: 0.0,
        }
    }
}

impl FilterAdjustments {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Named preset, e.g. `original`, `aden`, `clarendon`.
    pub preset: String,
    pub adjustments: FilterAdjustments,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            preset: "original".to_string(),
            adjustments: FilterAdjustments::default(),
        }
    }
}

/// Per-asset transform that is not an overlay: crop and color filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditMetadata {
    pub crop: CropSettings,
    pub filters: FilterSettings,
}

// ── Audio ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioCrop {
    /// Offset in seconds into the audio file that lines up with media time 0.
    pub start: f64,
}

/// Independent audio track played in lock-step with the primary media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioConfig {
    pub file: Option<String>,
    pub enabled: bool,
    pub volume: f32,
    pub crop: AudioCrop,
    pub mute_original_audio: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            file: None,
            enabled: false,
            volume: 1.0,
            crop: AudioCrop::default(),
            mute_original_audio: false,
        }
    }
}

impl AudioConfig {
    /// Volume clamped to `[0, 1]`.
    pub fn effective_volume(&self) -> f32 {
        if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Crop start, never negative.
    pub fn start_offset(&self) -> f64 {
        if self.crop.start.is_finite() {
            self.crop.start.max(0.0)
        } else {
            0.0
        }
    }
}

// ── Document bundle ────────────────────────────────────────────

/// Everything a host hands to the preview for one asset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateDocument {
    pub metadata: TemplateMetadata,
    pub edit_metadata: EditMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_config: Option<AudioConfig>,
}

impl TemplateDocument {
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            PostcraftError::Serialization(format!("Failed to serialize template: {}", e))
        })
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| PostcraftError::Serialization(format!("Failed to parse template: {}", e)))
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}
