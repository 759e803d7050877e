//! Integration tests for the editing surface.
//!
//! Pointer events go through `PreviewSurface`, the resulting actions are
//! dispatched into the document, and the document is checked afterwards,
//! the same round trip a host performs.

use postcraft_core::{
    FooterConfig, OverlayElement, OverlayKind, PercentRect, PreviewConfig, PreviewLayout, Rect,
    TemplateMetadata, Vec2,
};
use postcraft_editor::{GestureMode, Handle, MetadataSink, OverlayGesture, PointerEvent, PreviewSurface};
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────

const EPS: f32 = 1e-3;

fn container() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 1000.0)
}

fn surface_for(metadata: &TemplateMetadata) -> PreviewSurface {
    PreviewSurface::new(
        PreviewLayout::new(container(), &metadata.footer_config),
        PreviewConfig::default(),
    )
}

fn send(surface: &mut PreviewSurface, metadata: &mut TemplateMetadata, event: PointerEvent) {
    let actions = surface.handle(event, metadata);
    metadata.dispatch(actions);
    surface.set_layout(PreviewLayout::new(container(), &metadata.footer_config));
}

fn drag(surface: &mut PreviewSurface, metadata: &mut TemplateMetadata, from: Vec2, to: Vec2) {
    send(surface, metadata, PointerEvent::Down { x: from.x, y: from.y });
    send(surface, metadata, PointerEvent::Move { x: to.x, y: to.y });
    send(surface, metadata, PointerEvent::Up);
}

fn click(surface: &mut PreviewSurface, metadata: &mut TemplateMetadata, at: Vec2) {
    drag(surface, metadata, at, at);
}

fn overlay_rect(surface: &PreviewSurface, metadata: &TemplateMetadata, id: &str) -> Rect {
    surface
        .layout()
        .overlay_rect(metadata.overlay(id).unwrap().geometry)
}

fn approx(a: PercentRect, b: PercentRect) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.w - b.w).abs() < EPS && (a.h - b.h).abs() < EPS
}

fn avatar_at(geometry: PercentRect) -> TemplateMetadata {
    let mut m = TemplateMetadata::default();
    m.overlays
        .push(OverlayElement::new("avatar", OverlayKind::avatar(), geometry));
    m
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn avatar_corner_resizes_keep_opposite_corner() {
    let mut m = avatar_at(PercentRect::new(10.0, 10.0, 15.0, 15.0));
    let mut surface = surface_for(&m);

    let rect = overlay_rect(&surface, &m, "avatar");
    click(&mut surface, &mut m, rect.center());
    assert_eq!(surface.selected(), Some("avatar"));

    let se = Handle::Se.anchor(rect);
    drag(&mut surface, &mut m, se, se + Vec2::new(100.0, 100.0));
    let g = m.overlay("avatar").unwrap().geometry;
    assert!(approx(g, PercentRect::new(10.0, 10.0, 25.0, 25.0)), "{g:?}");

    let nw = Handle::Nw.anchor(overlay_rect(&surface, &m, "avatar"));
    drag(&mut surface, &mut m, nw, nw - Vec2::new(50.0, 50.0));
    let g = m.overlay("avatar").unwrap().geometry;
    assert!(approx(g, PercentRect::new(5.0, 5.0, 30.0, 30.0)), "{g:?}");
    assert!((g.right() - 35.0).abs() < EPS && (g.bottom() - 35.0).abs() < EPS);
}

#[test]
fn footer_west_handle_narrows_from_the_left() {
    let mut m = TemplateMetadata::default();
    m.footer_config.set_enabled(true);
    m.footer_config.height_percent = 15.0;
    let mut surface = surface_for(&m);

    let footer = surface.layout().footer.unwrap();
    let west = Handle::W.anchor(footer);
    drag(&mut surface, &mut m, west, west + Vec2::new(200.0, 0.0));

    let f = m.footer_config.geometry();
    assert!((f.w_percent - 80.0).abs() < EPS, "{f:?}");
    assert!((f.x_percent - 20.0).abs() < EPS, "{f:?}");
    assert_eq!(f.height_percent, 15.0);
}

#[test]
fn move_past_the_right_edge_pins_to_the_boundary() {
    let mut m = TemplateMetadata::default();
    m.overlays.push(OverlayElement::new(
        "logo",
        OverlayKind::Logo,
        PercentRect::new(10.0, 10.0, 20.0, 20.0),
    ));
    let mut surface = surface_for(&m);

    let center = overlay_rect(&surface, &m, "logo").center();
    drag(&mut surface, &mut m, center, center + Vec2::new(5000.0, 0.0));
    let g = m.overlay("logo").unwrap().geometry;
    assert!((g.x - 80.0).abs() < EPS, "{g:?}");
    assert!((g.y - 10.0).abs() < EPS, "{g:?}");
    assert_eq!((g.w, g.h), (20.0, 20.0));
}

#[test]
fn footer_edits_shrink_the_media_box_for_later_gestures() {
    let mut m = avatar_at(PercentRect::new(0.0, 0.0, 20.0, 20.0));
    m.footer_config.set_enabled(true);
    m.footer_config.height_percent = 20.0;
    let mut surface = surface_for(&m);
    assert_eq!(surface.layout().media.height, 800.0);

    let north = Handle::N.anchor(surface.layout().footer.unwrap());
    drag(&mut surface, &mut m, north, north - Vec2::new(0.0, 100.0));
    assert!((m.footer_config.height_percent - 30.0).abs() < EPS);
    assert!((surface.layout().media.height - 700.0).abs() < 0.1);

    // Overlay percentages now resolve against the shorter media box.
    assert!((overlay_rect(&surface, &m, "avatar").height - 140.0).abs() < 0.1);
}

// ── Properties ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Target {
    Body,
    Handle(Handle),
}

fn any_target() -> impl Strategy<Value = Target> {
    prop_oneof![
        Just(Target::Body),
        proptest::sample::select(Handle::ALL.to_vec()).prop_map(Target::Handle),
    ]
}

fn footer_target() -> impl Strategy<Value = Target> {
    prop_oneof![
        Just(Target::Body),
        proptest::sample::select(Handle::FOOTER.to_vec()).prop_map(Target::Handle),
    ]
}

fn two_overlays() -> TemplateMetadata {
    let mut m = TemplateMetadata::default();
    m.overlays.push(OverlayElement::new(
        "logo",
        OverlayKind::Logo,
        PercentRect::new(5.0, 5.0, 30.0, 20.0),
    ));
    m.overlays.push(OverlayElement::new(
        "username",
        OverlayKind::username("@ana"),
        PercentRect::new(40.0, 60.0, 40.0, 10.0),
    ));
    m
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn gesture_sequences_keep_overlays_inside_and_above_floor(
        ops in proptest::collection::vec(
            (0usize..2, any_target(), -3000.0f32..3000.0, -3000.0f32..3000.0),
            1..12,
        ),
    ) {
        let mut m = two_overlays();
        let mut surface = surface_for(&m);
        for (which, target, dx, dy) in ops {
            let id = ["logo", "username"][which];
            let rect = overlay_rect(&surface, &m, id);
            click(&mut surface, &mut m, rect.center());
            let from = match target {
                Target::Body => rect.center(),
                Target::Handle(h) => h.anchor(rect),
            };
            drag(&mut surface, &mut m, from, from + Vec2::new(dx, dy));

            for o in &m.overlays {
                prop_assert!(o.geometry.is_contained(EPS), "{}: {:?}", o.id, o.geometry);
                prop_assert!(o.geometry.w >= 5.0 - EPS && o.geometry.h >= 5.0 - EPS, "{}: {:?}", o.id, o.geometry);
            }
        }
    }

    #[test]
    fn footer_gestures_respect_limits(
        ops in proptest::collection::vec(
            (footer_target(), -3000.0f32..3000.0, -3000.0f32..3000.0),
            1..12,
        ),
    ) {
        let mut m = TemplateMetadata::default();
        m.footer_config = FooterConfig { enabled: true, ..FooterConfig::default() };
        let mut surface = surface_for(&m);
        for (target, dx, dy) in ops {
            let footer = surface.layout().footer.unwrap();
            let from = match target {
                Target::Body => footer.center(),
                Target::Handle(h) => h.anchor(footer),
            };
            drag(&mut surface, &mut m, from, from + Vec2::new(dx, dy));

            let f = m.footer_config.geometry();
            prop_assert!(f.x_percent >= -EPS && f.right() <= 100.0 + EPS, "{f:?}");
            prop_assert!(f.w_percent >= 10.0 - EPS, "{f:?}");
            prop_assert!((5.0 - EPS..=50.0 + EPS).contains(&f.height_percent), "{f:?}");
        }
    }

    #[test]
    fn edge_resizes_preserve_aspect_of_locked_overlays(
        x in 0.0f32..40.0, y in 0.0f32..40.0,
        w in 10.0f32..30.0, ratio in 0.5f32..2.0,
        handle in proptest::sample::select(vec![Handle::N, Handle::S, Handle::E, Handle::W]),
        dx in -500.0f32..500.0, dy in -500.0f32..500.0,
    ) {
        let start = PercentRect::new(x, y, w, w / ratio);
        let gesture = OverlayGesture::begin(
            GestureMode::Resize(handle),
            Vec2::ZERO,
            start,
            Vec2::new(1000.0, 1000.0),
            true,
            PreviewConfig::default().overlay_limits(),
        );
        let r = gesture.update_by_percent(dx, dy);
        prop_assert!((r.w / r.h - ratio).abs() < 1e-3 * ratio, "{start:?} -> {r:?}");
        prop_assert!(r.is_contained(EPS), "{r:?}");
    }
}
