//! Brush strokes for the avatar soft-edge mask.

use serde::{Deserialize, Serialize};

/// One erase dab, in percent of the overlay box.
///
/// `r` is a radius in percent of the box's shorter side, `blur` is the
/// share (0-100) of the radius that fades out, `opacity` is the erase
/// strength in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    #[serde(default)]
    pub blur: f32,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
}

fn full_opacity() -> f32 {
    1.0
}

impl Stroke {
    pub fn new(x: f32, y: f32, r: f32, blur: f32, opacity: f32) -> Self {
        Self {
            x,
            y,
            r,
            blur,
            opacity,
        }
    }
}

/// Ordered, append-only stroke history.
///
/// Order is significant: strokes are composited one after another with
/// erase blending. History can only be cut back as a whole (`reset`) or to a
/// prefix (`truncate_to`); there is no in-place editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeLog {
    strokes: Vec<Stroke>,
}

impl StrokeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke and return the new length.
    pub fn append(&mut self, stroke: Stroke) -> usize {
        self.strokes.push(stroke);
        self.strokes.len()
    }

    /// Drop every stroke.
    pub fn reset(&mut self) {
        self.strokes.clear();
    }

    /// Keep only the first `len` strokes. No-op when `len` is past the end.
    pub fn truncate_to(&mut self, len: usize) {
        self.strokes.truncate(len);
    }

    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

impl FromIterator<Stroke> for StrokeLog {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StrokeLog {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
