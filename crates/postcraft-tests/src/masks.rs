//! Integration tests for soft-edge masks.
//!
//! Strokes painted through the editor end up in the document, and the mask
//! crate turns them into the alpha the compositor applies.

use image::{Rgba, RgbaImage};
use postcraft_core::{
    OverlayElement, OverlayKind, OverlayPatch, PercentRect, PreviewConfig, PreviewLayout, Rect,
    SoftEdgeConfig, Stroke, TemplateMetadata,
};
use postcraft_editor::{EditorAction, MetadataSink, PointerEvent, PreviewSurface};
use postcraft_mask::{AlphaMask, MaskCache, MaskStore};
use proptest::prelude::*;

fn feathering_avatar() -> TemplateMetadata {
    let mut m = TemplateMetadata::default();
    let mut avatar = OverlayElement::new(
        "avatar",
        OverlayKind::avatar(),
        PercentRect::new(10.0, 10.0, 40.0, 40.0),
    );
    if let Some(cfg) = avatar.soft_edge_mut() {
        cfg.enabled = true;
        cfg.brush_size = 10.0;
        cfg.blur_strength = 50.0;
        cfg.opacity = 1.0;
    }
    m.overlays.push(avatar);
    m
}

fn soft_edge(m: &TemplateMetadata) -> &SoftEdgeConfig {
    m.overlay("avatar").and_then(|o| o.soft_edge()).unwrap()
}

#[test]
fn painting_erases_under_the_pointer() {
    let mut m = feathering_avatar();
    let layout = PreviewLayout::new(Rect::new(0.0, 0.0, 1000.0, 1000.0), &m.footer_config);
    let mut surface = PreviewSurface::new(layout, PreviewConfig::default());

    // The avatar covers 100..500 px; paint at its center.
    for event in [
        PointerEvent::Down { x: 300.0, y: 300.0 },
        PointerEvent::Move { x: 300.0, y: 300.0 },
        PointerEvent::Move { x: 310.0, y: 300.0 },
        PointerEvent::Up,
    ] {
        let actions = surface.handle(event, &m);
        m.dispatch(actions);
    }
    assert_eq!(soft_edge(&m).strokes.len(), 2);
    assert_eq!(m.overlay("avatar").unwrap().geometry, PercentRect::new(10.0, 10.0, 40.0, 40.0));

    let mut store = MaskStore::new();
    let mask = store.get("avatar", soft_edge(&m), 400, 400).unwrap();
    assert_eq!(mask.alpha_at(200, 200), Some(0.0));
    assert_eq!(mask.alpha_at(5, 5), Some(1.0));

    let mut content = RgbaImage::from_pixel(400, 400, Rgba([255, 255, 255, 255]));
    mask.apply_to(&mut content).unwrap();
    assert_eq!(content.get_pixel(200, 200).0[3], 0);
    assert_eq!(content.get_pixel(5, 5).0[3], 255);
}

#[test]
fn cache_follows_appends_and_resets() {
    let mut m = feathering_avatar();
    let mut cache = MaskCache::new();
    assert!(cache.get(soft_edge(&m), 64, 64).unwrap().is_opaque());
    assert_eq!(cache.renders(), 1);

    m.dispatch([EditorAction::UpdateOverlay {
        id: "avatar".into(),
        patch: OverlayPatch::AppendStroke(Stroke::new(50.0, 50.0, 20.0, 0.0, 1.0)),
    }]);
    assert!(!cache.get(soft_edge(&m), 64, 64).unwrap().is_opaque());
    // Appending extends the cached raster in place.
    assert_eq!(cache.renders(), 1);

    m.dispatch([EditorAction::UpdateOverlay {
        id: "avatar".into(),
        patch: OverlayPatch::ResetStrokes,
    }]);
    assert!(cache.get(soft_edge(&m), 64, 64).unwrap().is_opaque());
    assert_eq!(cache.renders(), 2);
}

#[test]
fn reset_on_empty_history_is_fully_opaque() {
    let mut m = feathering_avatar();
    for _ in 0..2 {
        m.dispatch([EditorAction::UpdateOverlay {
            id: "avatar".into(),
            patch: OverlayPatch::ResetStrokes,
        }]);
        assert!(soft_edge(&m).strokes.is_empty());
        let mask = AlphaMask::render(soft_edge(&m), 32, 48);
        assert!(mask.is_opaque());

        let disabled = SoftEdgeConfig {
            enabled: false,
            ..soft_edge(&m).clone()
        };
        assert_eq!(mask, AlphaMask::render(&disabled, 32, 48));
    }
}

#[test]
fn truncate_restores_an_earlier_mask() {
    let mut m = feathering_avatar();
    let first = Stroke::new(30.0, 30.0, 15.0, 40.0, 1.0);
    let second = Stroke::new(70.0, 70.0, 15.0, 40.0, 1.0);
    for stroke in [first, second] {
        m.dispatch([EditorAction::UpdateOverlay {
            id: "avatar".into(),
            patch: OverlayPatch::AppendStroke(stroke),
        }]);
    }
    m.dispatch([EditorAction::UpdateOverlay {
        id: "avatar".into(),
        patch: OverlayPatch::TruncateStrokes(1),
    }]);
    assert_eq!(
        AlphaMask::render(soft_edge(&m), 50, 50),
        AlphaMask::from_strokes(&[first], 50, 50)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn a_second_stroke_never_restores_opacity(
        x1 in 0.0f32..100.0, y1 in 0.0f32..100.0,
        x2 in 0.0f32..100.0, y2 in 0.0f32..100.0,
        r in 5.0f32..40.0, blur in 0.0f32..100.0, opacity in 0.0f32..=1.0,
    ) {
        let s1 = Stroke::new(x1, y1, r, blur, opacity);
        let s2 = Stroke::new(x2, y2, r, blur, opacity);
        let one = AlphaMask::from_strokes(&[s1], 40, 30);
        let only_second = AlphaMask::from_strokes(&[s2], 40, 30);
        let both = AlphaMask::from_strokes(&[s1, s2], 40, 30);
        for ((b, a1), a2) in both.data().iter().zip(one.data()).zip(only_second.data()) {
            prop_assert!(*b <= *a1 + 1e-6 && *b <= *a2 + 1e-6);
            prop_assert!((0.0..=1.0).contains(b));
        }
    }
}
