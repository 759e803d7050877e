//! Entrance animations.
//!
//! On play every animated overlay is snapped to an offset just outside the
//! media box, then released toward its resting position with an eased
//! transition.

use postcraft_core::{AnimationDirection, CubicBezier, PercentRect, Rect, Vec2};
use serde::Serialize;

/// Preview animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    /// Overlays rest at their authored position.
    #[default]
    Static,
    /// Overlays are snapped off-screen, waiting for the transition.
    Reset,
    /// Overlays travel back to their resting position.
    Animating,
}

/// Pixel offset that places an overlay fully outside the media box on the
/// side of `direction`. Diagonals combine both axes.
///
/// `rect` is the overlay in pixels relative to the media box's origin.
pub fn initial_offset(rect: Rect, media_size: Vec2, direction: AnimationDirection) -> Vec2 {
    let (sx, sy) = direction.signs();
    let x = match sx {
        s if s < 0 => -(rect.x + rect.width),
        s if s > 0 => media_size.x - rect.x,
        _ => 0.0,
    };
    let y = match sy {
        s if s < 0 => -(rect.y + rect.height),
        s if s > 0 => media_size.y - rect.y,
        _ => 0.0,
    };
    Vec2::new(x, y)
}

/// Convenience for percent geometry inside a media box of `media_size`.
pub fn initial_offset_for(geometry: PercentRect, media_size: Vec2, direction: AnimationDirection) -> Vec2 {
    let rect = geometry.to_pixels(Rect::from_min_size(Vec2::ZERO, media_size));
    initial_offset(rect, media_size, direction)
}

/// An eased transition from an offset back to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub started_at: f64,
    pub duration_secs: f32,
    pub easing: CubicBezier,
}

impl Transition {
    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: f64) -> f64 {
        let d = self.duration_secs as f64;
        if d <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / d).clamp(0.0, 1.0)
    }
}

/// Render transform of one overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMotion {
    /// Offset the overlay starts from.
    pub from: Vec2,
    /// `None` while the overlay is held at `from`.
    pub transition: Option<Transition>,
}

impl OverlayMotion {
    pub const RESTING: Self = Self {
        from: Vec2::ZERO,
        transition: None,
    };

    pub fn held(from: Vec2) -> Self {
        Self {
            from,
            transition: None,
        }
    }

    /// The offset the overlay is heading to.
    pub fn target(&self) -> Vec2 {
        match self.transition {
            Some(_) => Vec2::ZERO,
            None => self.from,
        }
    }

    pub fn is_transitioning(&self, now: f64) -> bool {
        self.transition.is_some_and(|t| t.progress(now) < 1.0)
    }

    /// The eased offset at `now`.
    pub fn offset_at(&self, now: f64) -> Vec2 {
        match self.transition {
            None => self.from,
            Some(t) => {
                let eased = t.easing.evaluate(t.progress(now)) as f32;
                self.from * (1.0 - eased)
            }
        }
    }
}
