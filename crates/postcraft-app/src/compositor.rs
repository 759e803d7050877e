//! CPU preview snapshot: media box, overlays and footer composited into one
//! RGBA frame.
//!
//! Overlays have no decoded artwork here; each is drawn as a tinted
//! placeholder of its kind so geometry, masks and entrance offsets can be
//! checked by eye.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use postcraft_color::FilterPipeline;
use postcraft_core::{
    crop_source_rect, AvatarShape, Color, OverlayElement, OverlayKind, PreviewLayout,
    TemplateDocument, Vec2,
};
use postcraft_mask::{MaskError, MaskStore};
use tracing::debug;

/// What to draw besides the document itself.
pub struct Scene<'a> {
    /// First frame of the primary media, if any.
    pub frame: Option<&'a RgbaImage>,
    /// Color behind the media box and default footer fill.
    pub background: Color,
    /// Entrance offset of an overlay, in pixels.
    pub offset_of: &'a dyn Fn(&str) -> Vec2,
}

/// Render one snapshot. `layout.container` is expected at the origin.
pub fn render_snapshot(
    doc: &TemplateDocument,
    layout: &PreviewLayout,
    scene: &Scene<'_>,
    masks: &mut MaskStore,
) -> Result<RgbaImage, MaskError> {
    let (width, height) = layout.container.raster_size();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(scene.background.to_rgba8()));

    if let Some(frame) = scene.frame {
        let media = media_frame(doc, frame, layout);
        imageops::overlay(
            &mut canvas,
            &media,
            layout.media.x.round() as i64,
            layout.media.y.round() as i64,
        );
    }

    for overlay in doc.metadata.visible_overlays() {
        let rect = layout.overlay_rect(overlay.geometry.sanitized());
        let (w, h) = rect.raster_size();
        let mut tile = placeholder(overlay, w, h);
        if let Some(cfg) = overlay.soft_edge() {
            if let Some(mask) = masks.get(&overlay.id, cfg, w, h) {
                mask.apply_to(&mut tile)?;
            }
        }
        let offset = (scene.offset_of)(&overlay.id);
        debug!(id = %overlay.id, w, h, dx = offset.x, dy = offset.y, "Compositing overlay");
        imageops::overlay(
            &mut canvas,
            &tile,
            (rect.x + offset.x).round() as i64,
            (rect.y + offset.y).round() as i64,
        );
    }

    if let Some(footer) = layout.footer {
        let fill = doc
            .metadata
            .footer_config
            .background_color
            .unwrap_or(scene.background);
        let (w, h) = footer.raster_size();
        let band = RgbaImage::from_pixel(w, h, Rgba(fill.to_rgba8()));
        imageops::overlay(
            &mut canvas,
            &band,
            footer.x.round() as i64,
            footer.y.round() as i64,
        );
    }

    masks.retain(doc.metadata.overlays.iter().map(|o| o.id.as_str()));
    Ok(canvas)
}

/// Crop, scale and color-grade the source frame into the media box.
fn media_frame(doc: &TemplateDocument, frame: &RgbaImage, layout: &PreviewLayout) -> RgbaImage {
    let natural = Vec2::new(frame.width() as f32, frame.height() as f32);
    let crop = crop_source_rect(natural, &doc.edit_metadata.crop);
    let x = (crop.x.round() as u32).min(frame.width().saturating_sub(1));
    let y = (crop.y.round() as u32).min(frame.height().saturating_sub(1));
    let (cw, ch) = crop.raster_size();
    let view = imageops::crop_imm(
        frame,
        x,
        y,
        cw.min(frame.width() - x),
        ch.min(frame.height() - y),
    )
    .to_image();

    let (mw, mh) = layout.media.raster_size();
    let mut scaled = imageops::resize(&view, mw, mh, FilterType::Triangle);
    FilterPipeline::from_settings(&doc.edit_metadata.filters).apply_rgba(&mut scaled);
    scaled
}

fn placeholder(overlay: &OverlayElement, width: u32, height: u32) -> RgbaImage {
    let fill = match &overlay.kind {
        OverlayKind::Avatar { .. } => Rgba([170, 170, 180, 255]),
        OverlayKind::Logo => Rgba([255, 255, 255, 220]),
        OverlayKind::Username { text_config, .. } => {
            let [r, g, b, _] = text_config
                .as_ref()
                .map_or(Color::WHITE, |c| c.color)
                .to_rgba8();
            Rgba([r, g, b, 180])
        }
        OverlayKind::Image { .. } => Rgba([110, 130, 200, 255]),
    };
    let mut tile = RgbaImage::from_pixel(width, height, fill);
    if let OverlayKind::Avatar {
        shape: AvatarShape::Round,
        ..
    } = overlay.kind
    {
        cut_ellipse(&mut tile);
    }
    tile
}

/// Clear everything outside the inscribed ellipse.
fn cut_ellipse(tile: &mut RgbaImage) {
    let (w, h) = (tile.width() as f32, tile.height() as f32);
    let (cx, cy) = (w / 2.0, h / 2.0);
    for (x, y, px) in tile.enumerate_pixels_mut() {
        let dx = (x as f32 + 0.5 - cx) / cx;
        let dy = (y as f32 + 0.5 - cy) / cy;
        if dx * dx + dy * dy > 1.0 {
            px.0[3] = 0;
        }
    }
}
