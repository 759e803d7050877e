//! Move and resize gestures in percent space.
//!
//! A gesture snapshots the pointer, the target geometry and the pixel size
//! of the containing box when it starts. Every pointer move is converted to
//! a percent delta against that snapshot and produces a complete new
//! geometry, so updates never accumulate rounding error.
//!
//! Out-of-range pointers are never rejected: the result is always clamped
//! back inside the box.

use postcraft_core::geometry::{clamp_origin, px_to_percent, FULL_PERCENT};
use postcraft_core::{FooterGeometry, PercentRect, SizeLimits, Vec2};
use serde::{Deserialize, Serialize};

use crate::handles::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureMode {
    Move,
    Resize(Handle),
}

// ── Overlays ───────────────────────────────────────────────────

/// An in-progress overlay move or resize.
#[derive(Debug, Clone)]
pub struct OverlayGesture {
    pub mode: GestureMode,
    start_pointer: Vec2,
    start: PercentRect,
    box_px: Vec2,
    /// `w / h` when the overlay keeps its aspect ratio.
    aspect: Option<f32>,
    limits: SizeLimits,
}

impl OverlayGesture {
    /// Snapshot the overlay at pointer-down. `box_px` is the media box size
    /// the percentages resolve against; with `aspect_locked` the start
    /// geometry's ratio is kept through every update.
    pub fn begin(
        mode: GestureMode,
        pointer: Vec2,
        geometry: PercentRect,
        box_px: Vec2,
        aspect_locked: bool,
        limits: SizeLimits,
    ) -> Self {
        let start = geometry.sanitized();
        Self {
            mode,
            start_pointer: pointer,
            start,
            box_px,
            aspect: aspect_locked.then(|| start.aspect()),
            limits,
        }
    }

    /// Geometry for the current pointer position.
    pub fn update(&self, pointer: Vec2) -> PercentRect {
        let d = pointer - self.start_pointer;
        self.update_by_percent(
            px_to_percent(d.x, self.box_px.x),
            px_to_percent(d.y, self.box_px.y),
        )
    }

    /// Geometry for a delta already expressed in percent of the box.
    pub fn update_by_percent(&self, dx: f32, dy: f32) -> PercentRect {
        let (dx, dy) = (finite_or_zero(dx), finite_or_zero(dy));
        match self.mode {
            GestureMode::Move => {
                let s = self.start;
                PercentRect::new(clamp_origin(s.x + dx, s.w), clamp_origin(s.y + dy, s.h), s.w, s.h)
            }
            GestureMode::Resize(handle) => match self.aspect {
                Some(ratio) => self.resize_locked(handle, dx, dy, ratio),
                None => self.resize_free(handle, dx, dy),
            },
        }
    }

    fn resize_free(&self, handle: Handle, dx: f32, dy: f32) -> PercentRect {
        let (w, h) = grown_size(self.start, handle, dx, dy);
        let (avail_w, avail_h) = available(self.start, handle);
        let w = w.max(self.limits.min_w).min(avail_w);
        let h = h.max(self.limits.min_h).min(avail_h);
        place(self.start, handle, w, h).contained()
    }

    fn resize_locked(&self, handle: Handle, dx: f32, dy: f32, ratio: f32) -> PercentRect {
        let (grown_w, grown_h) = grown_size(self.start, handle, dx, dy);
        let (avail_w, avail_h) = available(self.start, handle);
        let SizeLimits { min_w, min_h, .. } = self.limits;

        let (w, h) = if handle.drives_width() {
            let w = grown_w
                .max(min_w.max(min_h * ratio))
                .min(avail_w.min(avail_h * ratio));
            (w, w / ratio)
        } else {
            let h = grown_h
                .max(min_h.max(min_w / ratio))
                .min(avail_h.min(avail_w / ratio));
            (h * ratio, h)
        };
        place(self.start, handle, w, h).contained()
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Raw size after applying the delta to the edges the handle moves.
fn grown_size(start: PercentRect, handle: Handle, dx: f32, dy: f32) -> (f32, f32) {
    let mut w = start.w;
    let mut h = start.h;
    if handle.moves_east() {
        w += dx;
    }
    if handle.moves_west() {
        w -= dx;
    }
    if handle.moves_south() {
        h += dy;
    }
    if handle.moves_north() {
        h -= dy;
    }
    (w, h)
}

/// Largest size that keeps the anchored edges in place.
fn available(start: PercentRect, handle: Handle) -> (f32, f32) {
    let w = if handle.moves_west() {
        start.right()
    } else {
        FULL_PERCENT - start.x
    };
    let h = if handle.moves_north() {
        start.bottom()
    } else {
        FULL_PERCENT - start.y
    };
    (w, h)
}

/// Position a resized rect so the edges opposite the handle stay fixed.
fn place(start: PercentRect, handle: Handle, w: f32, h: f32) -> PercentRect {
    let x = if handle.moves_west() {
        start.right() - w
    } else {
        start.x
    };
    let y = if handle.moves_north() {
        start.bottom() - h
    } else {
        start.y
    };
    PercentRect::new(x, y, w, h)
}

// ── Footer ─────────────────────────────────────────────────────

/// An in-progress footer move or resize.
///
/// The footer only moves horizontally. Its height grows from the north
/// handle; east and west handles change its width.
#[derive(Debug, Clone)]
pub struct FooterGesture {
    pub mode: GestureMode,
    start_pointer: Vec2,
    start: FooterGeometry,
    canvas_px: Vec2,
    limits: SizeLimits,
}

impl FooterGesture {
    /// Snapshot the footer at pointer-down, measured against the container
    /// size `canvas_px`.
    ///
    /// Returns `None` for handles the footer does not have.
    pub fn begin(
        mode: GestureMode,
        pointer: Vec2,
        geometry: FooterGeometry,
        canvas_px: Vec2,
        limits: SizeLimits,
    ) -> Option<Self> {
        if let GestureMode::Resize(handle) = mode {
            if !Handle::FOOTER.contains(&handle) {
                return None;
            }
        }
        Some(Self {
            mode,
            start_pointer: pointer,
            start: geometry,
            canvas_px,
            limits,
        })
    }

    /// Footer geometry for the current pointer position.
    pub fn update(&self, pointer: Vec2) -> FooterGeometry {
        let d = pointer - self.start_pointer;
        self.update_by_percent(
            px_to_percent(d.x, self.canvas_px.x),
            px_to_percent(d.y, self.canvas_px.y),
        )
    }

    pub fn update_by_percent(&self, dx: f32, dy: f32) -> FooterGeometry {
        let (dx, dy) = (finite_or_zero(dx), finite_or_zero(dy));
        let s = self.start;
        let SizeLimits { min_w, min_h, max_h } = self.limits;
        let mut g = s;
        match self.mode {
            GestureMode::Move => {
                g.x_percent = clamp_origin(s.x_percent + dx, s.w_percent);
            }
            GestureMode::Resize(Handle::N) => {
                g.height_percent = (s.height_percent - dy).min(max_h).max(min_h);
            }
            GestureMode::Resize(Handle::E) => {
                g.w_percent = (s.w_percent + dx)
                    .max(min_w)
                    .min(FULL_PERCENT - s.x_percent);
            }
            GestureMode::Resize(Handle::W) => {
                let w = (s.w_percent - dx).max(min_w).min(s.right());
                g.x_percent = s.right() - w;
                g.w_percent = w;
            }
            GestureMode::Resize(_) => {}
        }
        contain_footer(g)
    }
}

fn contain_footer(g: FooterGeometry) -> FooterGeometry {
    let rect = PercentRect::new(g.x_percent, 0.0, g.w_percent, g.height_percent).contained();
    FooterGeometry {
        x_percent: rect.x,
        w_percent: rect.w,
        height_percent: rect.h,
    }
}
