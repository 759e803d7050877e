//! Geometric primitives: pixel rectangles and the percent coordinate model.
//!
//! Every overlay and the footer are positioned in percent of their immediate
//! containing box. Pixels only appear at the edges of the system: when a
//! gesture snapshots the box it is dragging inside, and when the layout maps
//! a percent rect onto the screen.

use glam::Vec2 as GlamVec2;
use serde::{Deserialize, Serialize};

/// 2D vector.
pub type Vec2 = GlamVec2;

/// Extent of a containing box in percent units.
pub const FULL_PERCENT: f32 = 100.0;

/// Width/height substituted for missing or degenerate overlay sizes.
pub const DEFAULT_SIZE_PERCENT: f32 = 10.0;

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Create a rectangle from center and size.
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x * 0.5,
            y: center.y - size.y * 0.5,
            width: size.x,
            height: size.y,
        }
    }

    /// Minimum corner (top-left).
    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Maximum corner (bottom-right).
    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Center point.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Size as a vector.
    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Pixel dimensions rounded for raster allocation (at least 1x1).
    pub fn raster_size(self) -> (u32, u32) {
        (
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }
}

/// A rectangle expressed in percent of its containing box.
///
/// Invariant after every mutation performed by the editor:
/// `0 <= x`, `x + w <= 100` and the same for `y`/`h`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    #[serde(rename = "xPercent", default)]
    pub x: f32,
    #[serde(rename = "yPercent", default)]
    pub y: f32,
    #[serde(rename = "wPercent", default = "default_size")]
    pub w: f32,
    #[serde(rename = "hPercent", default = "default_size")]
    pub h: f32,
}

fn default_size() -> f32 {
    DEFAULT_SIZE_PERCENT
}

impl Default for PercentRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_SIZE_PERCENT, DEFAULT_SIZE_PERCENT)
    }
}

impl PercentRect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.h
    }

    /// Width over height, both in percent units.
    pub fn aspect(self) -> f32 {
        if self.h > 0.0 {
            self.w / self.h
        } else {
            1.0
        }
    }

    /// Replace unreadable values with defaults, the way a host reading
    /// `wPercent || 10` would.
    pub fn sanitized(self) -> Self {
        let pos = |v: f32| if v.is_finite() { v } else { 0.0 };
        let size = |v: f32| {
            if v.is_finite() && v > 0.0 {
                v.min(FULL_PERCENT)
            } else {
                DEFAULT_SIZE_PERCENT
            }
        };
        Self::new(pos(self.x), pos(self.y), size(self.w), size(self.h)).contained()
    }

    /// Pull the rect back inside `[0, 100]` on both axes.
    ///
    /// A negative origin is absorbed by shrinking the size so the far edge
    /// stays put; an overflowing far edge is cut back to 100.
    pub fn contained(self) -> Self {
        let (x, w) = contain_axis(self.x, self.w);
        let (y, h) = contain_axis(self.y, self.h);
        Self::new(x, y, w, h)
    }

    /// Whether the containment invariant holds within `eps`.
    pub fn is_contained(self, eps: f32) -> bool {
        self.x >= -eps
            && self.y >= -eps
            && self.right() <= FULL_PERCENT + eps
            && self.bottom() <= FULL_PERCENT + eps
    }

    /// Map onto a pixel box.
    pub fn to_pixels(self, container: Rect) -> Rect {
        Rect::new(
            container.x + self.x / FULL_PERCENT * container.width,
            container.y + self.y / FULL_PERCENT * container.height,
            self.w / FULL_PERCENT * container.width,
            self.h / FULL_PERCENT * container.height,
        )
    }

    /// Express a pixel rect in percent of `container`.
    pub fn from_pixels(rect: Rect, container: Rect) -> Self {
        Self::new(
            px_to_percent(rect.x - container.x, container.width),
            px_to_percent(rect.y - container.y, container.height),
            px_to_percent(rect.width, container.width),
            px_to_percent(rect.height, container.height),
        )
    }
}

fn contain_axis(mut origin: f32, mut len: f32) -> (f32, f32) {
    origin = origin.min(FULL_PERCENT);
    if origin < 0.0 {
        len += origin;
        origin = 0.0;
    }
    if origin + len > FULL_PERCENT {
        len = FULL_PERCENT - origin;
    }
    (origin, len.max(0.0))
}

/// Convert a pixel distance to percent of `extent`.
///
/// A collapsed or unreadable extent yields zero so a gesture on a box that
/// has not been laid out yet cannot produce non-finite geometry.
#[inline]
pub fn px_to_percent(delta_px: f32, extent_px: f32) -> f32 {
    if extent_px > 0.0 && extent_px.is_finite() && delta_px.is_finite() {
        delta_px / extent_px * FULL_PERCENT
    } else {
        0.0
    }
}

/// Clamp an origin so that `origin + len` stays within `[0, 100]`.
///
/// Unlike `f32::clamp` this never panics when `len` exceeds the box.
#[inline]
pub fn clamp_origin(origin: f32, len: f32) -> f32 {
    origin.min(FULL_PERCENT - len).max(0.0)
}
