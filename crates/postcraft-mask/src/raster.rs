//! Soft-edge alpha mask rasterization.
//!
//! The mask starts fully opaque. Each stroke erases a radial gradient
//! (opaque center, transparent rim) with destination-out blending:
//! `dst = dst * (1 - src)`. Strokes are applied in log order.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use postcraft_core::{SoftEdgeConfig, Stroke};
use rayon::prelude::*;

use crate::error::MaskError;

/// A float alpha matte in row-major order, values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl AlphaMask {
    /// A mask that hides nothing.
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![1.0; width as usize * height as usize],
        }
    }

    /// Render the mask for an overlay box of `width` x `height` pixels.
    ///
    /// A disabled config yields a fully opaque mask regardless of its
    /// stroke history.
    pub fn render(config: &SoftEdgeConfig, width: u32, height: u32) -> Self {
        if !config.enabled {
            return Self::opaque(width, height);
        }
        Self::from_strokes(config.strokes.as_slice(), width, height)
    }

    pub fn from_strokes(strokes: &[Stroke], width: u32, height: u32) -> Self {
        let mut mask = Self::opaque(width, height);
        for stroke in strokes {
            mask.erase(stroke);
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Alpha at a pixel, `None` outside the mask.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn is_opaque(&self) -> bool {
        self.data.iter().all(|&a| a >= 1.0)
    }

    /// Composite one stroke with destination-out blending.
    ///
    /// Only rows and columns inside the stroke's bounding box are touched.
    pub fn erase(&mut self, stroke: &Stroke) {
        let Some(dab) = Dab::new(stroke, self.width, self.height) else {
            return;
        };

        let w = self.width as usize;
        let x0 = (dab.cx - dab.radius).floor().max(0.0) as usize;
        let x1 = ((dab.cx + dab.radius).ceil().max(0.0) as usize).min(w);
        let y0 = (dab.cy - dab.radius).floor().max(0.0) as usize;
        let y1 = ((dab.cy + dab.radius).ceil().max(0.0) as usize).min(self.height as usize);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        self.data
            .par_chunks_mut(w)
            .enumerate()
            .skip(y0)
            .take(y1 - y0)
            .for_each(|(y, row)| {
                let py = y as f32 + 0.5;
                for (x, dst) in row.iter_mut().enumerate().take(x1).skip(x0) {
                    let src = dab.alpha_at(x as f32 + 0.5, py);
                    *dst *= 1.0 - src;
                }
            });
    }

    /// A white image carrying the mask in its alpha channel, usable as a
    /// CSS `mask-image`.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let a = self.alpha_at(x, y).unwrap_or(1.0);
            Rgba([255, 255, 255, to_u8(a)])
        })
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>, MaskError> {
        let mut buf = Cursor::new(Vec::new());
        self.to_rgba_image().write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Multiply the content's alpha channel by the mask.
    pub fn apply_to(&self, content: &mut RgbaImage) -> Result<(), MaskError> {
        let got = content.dimensions();
        if got != (self.width, self.height) {
            return Err(MaskError::DimensionMismatch {
                expected: (self.width, self.height),
                got,
            });
        }
        for (px, &a) in content.pixels_mut().zip(self.data.iter()) {
            px[3] = (px[3] as f32 * a).round() as u8;
        }
        Ok(())
    }
}

fn to_u8(a: f32) -> u8 {
    (a.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A stroke resolved to pixel space.
struct Dab {
    cx: f32,
    cy: f32,
    radius: f32,
    inner: f32,
    strength: f32,
}

impl Dab {
    fn new(stroke: &Stroke, width: u32, height: u32) -> Option<Self> {
        let short = width.min(height) as f32;
        let radius = stroke.r / 100.0 * short;
        let strength = stroke.opacity.clamp(0.0, 1.0);
        if !(radius.is_finite() && radius > 0.0) || strength <= 0.0 {
            return None;
        }
        let feather = (stroke.blur / 100.0).clamp(0.0, 1.0);
        Some(Self {
            cx: stroke.x / 100.0 * width as f32,
            cy: stroke.y / 100.0 * height as f32,
            radius,
            inner: radius * (1.0 - feather),
            strength,
        })
    }

    fn alpha_at(&self, px: f32, py: f32) -> f32 {
        let d = ((px - self.cx).powi(2) + (py - self.cy).powi(2)).sqrt();
        if d >= self.radius {
            0.0
        } else if d <= self.inner {
            self.strength
        } else {
            self.strength * (self.radius - d) / (self.radius - self.inner)
        }
    }
}
