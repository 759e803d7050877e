//! CSS-style cubic Bézier timing functions.
//!
//! Evaluation uses Newton-Raphson to invert the X polynomial, falling back to
//! bisection where the derivative flattens out, then samples Y.

use serde::{Deserialize, Serialize};
use std::fmt;

const EPSILON: f64 = 1e-10;

/// Cubic Bézier control points for easing (x1, y1, x2, y2).
/// The curve goes from (0,0) to (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample_x(&self, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        3.0 * mt * mt * t * self.x1 + 3.0 * mt * t2 * self.x2 + t3
    }

    fn sample_y(&self, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        3.0 * mt * mt * t * self.y1 + 3.0 * mt * t2 * self.y2 + t3
    }

    fn sample_dx(&self, t: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * self.x1 + 6.0 * mt * t * (self.x2 - self.x1) + 3.0 * t * t * (1.0 - self.x2)
    }

    /// Map linear progress `x` in `[0, 1]` to eased progress.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut t = x;
        for _ in 0..8 {
            let x_est = self.sample_x(t) - x;
            if x_est.abs() < EPSILON {
                return self.sample_y(t);
            }
            let dx = self.sample_dx(t);
            if dx.abs() < 1e-12 {
                break;
            }
            t = (t - x_est / dx).clamp(0.0, 1.0);
        }

        // X is monotonic on [0, 1] for control points inside the unit square.
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let x_est = self.sample_x(t);
            if (x_est - x).abs() < EPSILON {
                break;
            }
            if x_est < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }

        self.sample_y(t)
    }

    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Decelerating curve used for overlay entrances.
    pub const ENTRANCE: Self = Self::new(0.25, 0.46, 0.45, 0.94);
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::ENTRANCE
    }
}

/// Renders as a CSS `cubic-bezier(...)` timing function.
impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}
