//! Resize handles and their hit areas.

use postcraft_core::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A compass resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Handle {
    /// Corners first so they win over edges where hit areas overlap.
    pub const ALL: [Self; 8] = [
        Self::Nw,
        Self::Ne,
        Self::Se,
        Self::Sw,
        Self::N,
        Self::E,
        Self::S,
        Self::W,
    ];

    /// The footer's bottom edge is anchored, so it has no south handles.
    pub const FOOTER: [Self; 3] = [Self::N, Self::E, Self::W];

    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether an aspect-locked resize takes its size from the horizontal
    /// delta. Corners count as horizontal.
    pub fn drives_width(self) -> bool {
        self.moves_east() || self.moves_west()
    }

    /// Center of the handle on `rect`.
    pub fn anchor(self, rect: Rect) -> Vec2 {
        let min = rect.min();
        let max = rect.max();
        let c = rect.center();
        match self {
            Self::N => Vec2::new(c.x, min.y),
            Self::S => Vec2::new(c.x, max.y),
            Self::E => Vec2::new(max.x, c.y),
            Self::W => Vec2::new(min.x, c.y),
            Self::Ne => Vec2::new(max.x, min.y),
            Self::Nw => min,
            Self::Se => max,
            Self::Sw => Vec2::new(min.x, max.y),
        }
    }

    /// CSS cursor shown while hovering the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Hit test `pos` against the square handle areas of `rect`.
///
/// Each handle is a square of side `hit_px` centered on its anchor, so it
/// reaches half its size outside the rect.
pub fn hit_test_handle(rect: Rect, pos: Vec2, hit_px: f32, handles: &[Handle]) -> Option<Handle> {
    let half = hit_px.max(0.0) / 2.0;
    handles.iter().copied().find(|h| {
        let a = h.anchor(rect);
        (pos.x - a.x).abs() <= half && (pos.y - a.y).abs() <= half
    })
}
