//! Preview layout: container fitting, the media box and the footer box.
//!
//! The container is the rendered canvas. When the footer is enabled its
//! height is taken off the bottom of the container and the remaining area is
//! the media box, which is what overlay percentages refer to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::CropSettings;
use crate::error::PostcraftError;
use crate::footer::FooterConfig;
use crate::geometry::{PercentRect, Rect, Vec2, FULL_PERCENT};

// ── Aspect ratio ───────────────────────────────────────────────

/// Output aspect ratio, written `"W:H"` or `"original"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    /// Follow the media's natural size.
    #[default]
    Original,
    Ratio { w: f32, h: f32 },
}

impl AspectRatio {
    pub const SQUARE: Self = Self::Ratio { w: 1.0, h: 1.0 };
    pub const PORTRAIT_4_5: Self = Self::Ratio { w: 4.0, h: 5.0 };
    pub const LANDSCAPE_16_9: Self = Self::Ratio { w: 16.0, h: 9.0 };
    pub const STORY_9_16: Self = Self::Ratio { w: 9.0, h: 16.0 };

    /// Width over height. `Original` uses `natural`, then `fallback`.
    pub fn value(self, natural: Option<Vec2>, fallback: Vec2) -> f32 {
        let from_size = |size: Vec2| (size.x > 0.0 && size.y > 0.0).then(|| size.x / size.y);
        match self {
            Self::Ratio { w, h } => w / h,
            Self::Original => natural
                .and_then(from_size)
                .or_else(|| from_size(fallback))
                .unwrap_or(1.0),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = PostcraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }
        let invalid = || PostcraftError::InvalidAspectRatio(s.to_string());
        let (w, h) = s.split_once(':').ok_or_else(invalid)?;
        let w: f32 = w.trim().parse().map_err(|_| invalid())?;
        let h: f32 = h.trim().parse().map_err(|_| invalid())?;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(invalid());
        }
        Ok(Self::Ratio { w, h })
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = PostcraftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.to_string()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Ratio { w, h } => write!(f, "{w}:{h}"),
        }
    }
}

// ── Canvas ─────────────────────────────────────────────────────

/// Design-time pixel canvas that percentages are conceptually mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasSettings {
    pub reference_width: u32,
    pub reference_height: u32,
    pub aspect_ratio: AspectRatio,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            reference_width: 1080,
            reference_height: 1920,
            aspect_ratio: AspectRatio::STORY_9_16,
        }
    }
}

impl CanvasSettings {
    pub fn reference_size(&self) -> Vec2 {
        Vec2::new(self.reference_width as f32, self.reference_height as f32)
    }
}

// ── Layout ─────────────────────────────────────────────────────

/// Largest box of aspect `ratio` centered inside `available`.
pub fn fit_container(available: Rect, ratio: f32) -> Rect {
    if !(ratio.is_finite() && ratio > 0.0) || available.height <= 0.0 {
        return available;
    }
    let available_ratio = available.width / available.height;
    let size = if available_ratio > ratio {
        Vec2::new(available.height * ratio, available.height)
    } else {
        Vec2::new(available.width, available.width / ratio)
    };
    Rect::from_center_size(available.center(), size)
}

/// Pixel boxes of one rendered preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    /// Whole rendered canvas.
    pub container: Rect,
    /// Area overlays are positioned in.
    pub media: Rect,
    /// Footer region, when enabled.
    pub footer: Option<Rect>,
}

impl PreviewLayout {
    /// Lay out a preview whose container is exactly `container`.
    pub fn new(container: Rect, footer: &FooterConfig) -> Self {
        let reserved = container.height * footer.reserved_height_percent() / FULL_PERCENT;
        let media = Rect::new(
            container.x,
            container.y,
            container.width,
            container.height - reserved,
        );
        let footer_rect = footer.enabled.then(|| {
            Rect::new(
                container.x + footer.x_percent / FULL_PERCENT * container.width,
                container.y + container.height - reserved,
                footer.w_percent / FULL_PERCENT * container.width,
                reserved,
            )
        });
        Self {
            container,
            media,
            footer: footer_rect,
        }
    }

    /// Fit a container of aspect `ratio` into `available`, then lay it out.
    pub fn fit(available: Rect, ratio: f32, footer: &FooterConfig) -> Self {
        Self::new(fit_container(available, ratio), footer)
    }

    /// Pixel rect of an overlay.
    pub fn overlay_rect(&self, geometry: PercentRect) -> Rect {
        geometry.to_pixels(self.media)
    }
}

/// Visible part of the source media for a crop setting, in source pixels.
///
/// The largest window of the crop ratio is scaled down by the zoom level and
/// panned by `position` (percent of the slack, 50/50 centers it).
pub fn crop_source_rect(natural: Vec2, crop: &CropSettings) -> Rect {
    if natural.x <= 0.0 || natural.y <= 0.0 {
        return Rect::default();
    }
    let target = crop.ratio.value(Some(natural), natural);
    let natural_ratio = natural.x / natural.y;
    let base = if natural_ratio > target {
        Vec2::new(natural.y * target, natural.y)
    } else {
        Vec2::new(natural.x, natural.x / target)
    };
    let zoom = if crop.zoom_level.is_finite() {
        crop.zoom_level.max(1.0)
    } else {
        1.0
    };
    let size = base / zoom;
    let slack = natural - size;
    let pan = Vec2::new(
        crop.position.x.clamp(0.0, FULL_PERCENT),
        crop.position.y.clamp(0.0, FULL_PERCENT),
    ) / FULL_PERCENT;
    Rect::from_min_size(slack * pan, size)
}
