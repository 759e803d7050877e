//! Integration tests for playback coordination.
//!
//! Drives `PlaybackCoordinator` with simulated media against documents and
//! layouts built by the core crate.

use image::{Rgba, RgbaImage};
use postcraft_core::{
    AnimationDirection, AnimationSpec, AudioConfig, AudioCrop, Color, FooterConfig,
    OverlayElement, OverlayKind, PercentRect, PreviewConfig, PreviewLayout, Rect,
    TemplateMetadata, Vec2,
};
use postcraft_editor::MetadataSink;
use postcraft_playback::{
    AnimationPhase, MediaElement, MediaError, PlaybackCoordinator, SimulatedMedia,
};

// ── Helpers ────────────────────────────────────────────────────

const GEOMETRY: PercentRect = PercentRect::new(10.0, 20.0, 30.0, 10.0);

fn animated(id: &str, direction: AnimationDirection) -> OverlayElement {
    OverlayElement::new(id, OverlayKind::Logo, GEOMETRY).with_animation(AnimationSpec {
        enabled: true,
        direction,
        speed: 1.0,
    })
}

fn four_sides() -> TemplateMetadata {
    let mut m = TemplateMetadata::default();
    m.overlays.push(animated("top", AnimationDirection::Top));
    m.overlays.push(animated("right", AnimationDirection::Right));
    m.overlays.push(animated("bottom", AnimationDirection::Bottom));
    m.overlays.push(animated("left", AnimationDirection::Left));
    m.overlays.push(OverlayElement::new(
        "still",
        OverlayKind::username("@ana"),
        GEOMETRY,
    ));
    m
}

fn audio(start: f64) -> AudioConfig {
    AudioConfig {
        file: Some("track.mp3".into()),
        enabled: true,
        volume: 0.5,
        crop: AudioCrop { start },
        mute_original_audio: true,
    }
}

/// Primary, two overlay mask videos, a footer mask video and an audio track.
fn coordinator() -> PlaybackCoordinator {
    let mut c = PlaybackCoordinator::new(PreviewConfig::default());
    let media = c.media_mut();
    media.set_primary(Some(Box::new(SimulatedMedia::new(Some(60.0)))));
    media.set_overlay_mask("top", Box::new(SimulatedMedia::looping(4.0)));
    media.set_overlay_mask("right", Box::new(SimulatedMedia::looping(2.5)));
    media.set_footer_mask(Some(Box::new(SimulatedMedia::looping(3.0))));
    media.set_audio(Some(Box::new(SimulatedMedia::new(None))));
    c.configure_audio(Some(audio(12.0)));
    c
}

fn time_of(media: Option<&dyn MediaElement>) -> f64 {
    media.map(|m| m.current_time()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Entrance offsets ───────────────────────────────────────────

#[test]
fn play_snaps_each_side_just_outside_the_media_box() {
    let mut footer = FooterConfig::default();
    footer.set_enabled(true);
    footer.height_percent = 20.0;
    let layout = PreviewLayout::new(Rect::new(0.0, 0.0, 1000.0, 2500.0), &footer);
    let media = layout.media.size();
    assert_eq!(media, Vec2::new(1000.0, 2000.0));

    let m = four_sides();
    let mut c = coordinator();
    c.play(5.0, &m, media);
    assert_eq!(c.phase(), AnimationPhase::Reset);

    // The overlay spans x 100..400 and y 400..600 of the media box.
    assert_eq!(c.overlay_offset("top", 5.0), Vec2::new(0.0, -600.0));
    assert_eq!(c.overlay_offset("right", 5.0), Vec2::new(900.0, 0.0));
    assert_eq!(c.overlay_offset("bottom", 5.0), Vec2::new(0.0, 1600.0));
    assert_eq!(c.overlay_offset("left", 5.0), Vec2::new(-400.0, 0.0));
    assert_eq!(c.overlay_offset("still", 5.0), Vec2::ZERO);
}

#[test]
fn hidden_overlays_never_leave_their_place() {
    let mut m = four_sides();
    if let Some(top) = m.overlays.iter_mut().find(|o| o.id == "top") {
        top.visible = false;
    }
    let mut c = coordinator();
    c.play(0.0, &m, Vec2::new(1000.0, 2000.0));
    assert_eq!(c.overlay_offset("top", 0.0), Vec2::ZERO);
    assert_eq!(c.overlay_offset("left", 0.0), Vec2::new(-400.0, 0.0));

    assert!(c.tick(0.06, &m));
    assert_eq!(c.overlay_offset("top", 0.3), Vec2::ZERO);
    assert!(!c.overlay_motion("top").is_transitioning(0.3));
    assert!(c.overlay_motion("left").is_transitioning(0.3));
}

#[test]
fn entrance_runs_after_the_delay_and_settles() {
    let m = four_sides();
    let mut c = coordinator();
    c.play(0.0, &m, Vec2::new(1000.0, 2000.0));

    assert!(!c.tick(0.01, &m));
    assert!(c.media().primary().unwrap().is_paused());

    assert!(c.tick(0.06, &m));
    assert_eq!(c.phase(), AnimationPhase::Animating);
    assert!(!c.media().primary().unwrap().is_paused());
    assert!(!c.media().overlay_mask("top").unwrap().is_paused());
    assert!(!c.media().audio().unwrap().is_paused());
    // Audio starts at its crop offset plus the primary's position.
    assert!(close(time_of(c.media().audio()), 12.0));

    let start = c.overlay_offset("left", 0.06);
    let mid = c.overlay_offset("left", 0.56);
    assert_eq!(start, Vec2::new(-400.0, 0.0));
    assert!(mid.x > start.x && mid.x < 0.0, "{mid:?}");
    assert_eq!(c.overlay_offset("left", 1.2), Vec2::ZERO);
    assert!(c.overlay_motion("left").is_transitioning(0.56));

    c.pause();
    assert_eq!(c.phase(), AnimationPhase::Static);
    assert!(c.media().primary().unwrap().is_paused());
    assert_eq!(c.overlay_offset("left", 0.56), Vec2::ZERO);
}

#[test]
fn blocked_autoplay_still_reveals_overlays() {
    let m = four_sides();
    let mut c = PlaybackCoordinator::new(PreviewConfig::default());
    let mut primary = SimulatedMedia::new(Some(10.0));
    primary.reject_play = true;
    c.media_mut().set_primary(Some(Box::new(primary)));

    c.play(0.0, &m, Vec2::new(1000.0, 1000.0));
    assert!(c.tick(1.0, &m));
    assert_eq!(c.phase(), AnimationPhase::Animating);
    assert!(c.media().primary().unwrap().is_paused());
    assert_eq!(c.overlay_offset("top", 5.0), Vec2::ZERO);
}

// ── Media sync ─────────────────────────────────────────────────

#[test]
fn seek_wraps_masks_and_offsets_audio() {
    let mut c = coordinator();
    c.seek(9.5);

    assert!(close(time_of(c.media().primary()), 9.5));
    assert!(close(time_of(c.media().overlay_mask("top")), 1.5));
    assert!(close(time_of(c.media().overlay_mask("right")), 2.0));
    assert!(close(time_of(c.media().footer_mask()), 0.5));
    assert!(close(time_of(c.media().audio()), 21.5));
}

#[test]
fn drifted_masks_are_pulled_back() {
    let mut c = coordinator();
    c.seek(5.0);
    assert_eq!(c.on_time_update(), 0);

    // Nudge the first overlay mask ("top", 4s loop) off its expected 1.0s.
    if let Some(mask) = c.media_mut().masks_mut().next() {
        mask.set_current_time(1.5);
    }
    assert_eq!(c.on_time_update(), 1);
    assert!(close(time_of(c.media().overlay_mask("top")), 1.0));

    // Within tolerance is left alone.
    if let Some(mask) = c.media_mut().masks_mut().next() {
        mask.set_current_time(1.1);
    }
    assert_eq!(c.on_time_update(), 0);
    assert!(close(time_of(c.media().overlay_mask("top")), 1.1));
}

#[test]
fn reset_rewinds_audio_to_its_crop_start() {
    let m = four_sides();
    let mut c = coordinator();
    c.play(0.0, &m, Vec2::new(1000.0, 1000.0));
    c.tick(1.0, &m);
    c.seek(30.0);
    c.reset();

    assert_eq!(c.phase(), AnimationPhase::Static);
    assert!(!c.is_playing());
    assert!(close(time_of(c.media().primary()), 0.0));
    assert!(close(time_of(c.media().overlay_mask("right")), 0.0));
    assert!(close(time_of(c.media().audio()), 12.0));
}

#[test]
fn audio_track_settings_reach_the_elements() {
    let mut c = coordinator();
    assert!(c.media().primary().unwrap().muted());
    assert!(!c.media().audio().unwrap().muted());
    assert_eq!(c.media().audio().unwrap().volume(), 0.5);

    c.configure_audio(Some(AudioConfig {
        enabled: false,
        ..audio(0.0)
    }));
    assert!(!c.media().primary().unwrap().muted());
    assert!(c.media().audio().unwrap().muted());
}

// ── Background ─────────────────────────────────────────────────

#[test]
fn sampled_background_fills_an_unset_footer() {
    let mut m = four_sides();
    m.footer_config.set_enabled(true);
    let mut c = coordinator();

    let frame = RgbaImage::from_pixel(16, 9, Rgba([30, 60, 90, 255]));
    let patch = c.on_primary_loaded(Ok(&frame), &m).unwrap();
    m.update_footer(patch);
    assert_eq!(
        m.footer_config.background_color,
        Some(Color::from_rgba8(30, 60, 90, 255))
    );

    // An explicit footer color is kept.
    assert!(c.on_primary_loaded(Ok(&frame), &m).is_none());
}

#[test]
fn unreadable_frame_uses_the_fallback_color() {
    let m = TemplateMetadata::default();
    let mut c = coordinator();
    let err = Err(MediaError::Sampling("tainted canvas".into()));
    let patch = c.on_primary_loaded(err, &m);
    assert_eq!(c.background(), PreviewConfig::default().fallback_color);
    assert!(patch.is_some());
}
