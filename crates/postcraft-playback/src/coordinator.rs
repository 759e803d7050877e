//! Playback coordinator: keeps the primary media, mask videos and the audio
//! track together, and sequences entrance animations.
//!
//! Phases run `static -> reset -> animating -> static`. `play` snaps every
//! animated overlay off-screen (reset); the next `tick` at least
//! `animate_delay` later releases them and starts all media (animating);
//! pause, reset and the end of the primary media return to static.
//!
//! Media failures never escape: every control call is guarded and logged.

use std::collections::HashMap;

use image::RgbaImage;
use postcraft_core::{AudioConfig, Color, FooterPatch, PreviewConfig, TemplateMetadata, Vec2};
use tracing::{debug, info, trace, warn};

use crate::animation::{initial_offset_for, AnimationPhase, OverlayMotion, Transition};
use crate::background::background_color;
use crate::error::MediaError;
use crate::media::{loop_time, MediaElement, MediaRegistry};

pub struct PlaybackCoordinator {
    config: PreviewConfig,
    media: MediaRegistry,
    audio: Option<AudioConfig>,
    phase: AnimationPhase,
    playing: bool,
    reset_at: f64,
    motions: HashMap<String, OverlayMotion>,
    background: Color,
}

impl PlaybackCoordinator {
    pub fn new(config: PreviewConfig) -> Self {
        let background = config.fallback_color;
        Self {
            config,
            media: MediaRegistry::new(),
            audio: None,
            phase: AnimationPhase::Static,
            playing: false,
            reset_at: 0.0,
            motions: HashMap::new(),
            background,
        }
    }

    pub fn media(&self) -> &MediaRegistry {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaRegistry {
        &mut self.media
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Apply the audio track settings to the attached elements.
    ///
    /// The track's volume goes to the audio element; `muteOriginalAudio`
    /// mutes the primary media while the track is enabled.
    pub fn configure_audio(&mut self, audio: Option<AudioConfig>) {
        let enabled = audio.as_ref().is_some_and(|a| a.enabled);
        if let (Some(cfg), Some(el)) = (audio.as_ref(), self.media.audio_mut()) {
            el.set_volume(cfg.effective_volume());
            el.set_muted(!cfg.enabled);
        }
        if let Some(primary) = self.media.primary_mut() {
            let mute = enabled && audio.as_ref().is_some_and(|a| a.mute_original_audio);
            primary.set_muted(mute);
        }
        debug!(enabled, "Configured audio track");
        self.audio = audio;
    }

    fn audio_start(&self) -> f64 {
        self.audio.as_ref().map_or(0.0, AudioConfig::start_offset)
    }

    fn audio_enabled(&self) -> bool {
        self.audio.as_ref().is_some_and(|a| a.enabled)
    }

    // ── Transport ──────────────────────────────────────────────

    /// Start playback at host time `now`.
    ///
    /// Animated overlays are snapped to their off-screen offset right away;
    /// media starts on the first `tick` after the animate delay.
    pub fn play(&mut self, now: f64, metadata: &TemplateMetadata, media_size: Vec2) {
        self.motions = metadata
            .visible_overlays()
            .filter(|o| o.animation.is_active())
            .map(|o| {
                let offset =
                    initial_offset_for(o.geometry.sanitized(), media_size, o.animation.direction);
                (o.id.clone(), OverlayMotion::held(offset))
            })
            .collect();
        self.phase = AnimationPhase::Reset;
        self.playing = true;
        self.reset_at = now;
        info!(animated = self.motions.len(), "Playback requested");
    }

    /// Advance the state machine. Returns `true` when this call entered the
    /// animating phase.
    pub fn tick(&mut self, now: f64, metadata: &TemplateMetadata) -> bool {
        if self.phase != AnimationPhase::Reset {
            return false;
        }
        let delay = self.config.animate_delay().as_secs_f64();
        if now - self.reset_at < delay {
            return false;
        }

        let easing = self.config.transition_easing;
        for (id, motion) in self.motions.iter_mut() {
            let duration_secs = metadata
                .overlay(id)
                .map_or(1.0, |o| o.animation.duration_secs());
            motion.transition = Some(Transition {
                started_at: now,
                duration_secs,
                easing,
            });
        }
        self.phase = AnimationPhase::Animating;
        self.start_media();
        info!("Playback started");
        true
    }

    fn start_media(&mut self) {
        let primary_time = self.media.primary().map_or(0.0, |m| m.current_time());
        let audio_at = self.audio_start() + primary_time;
        let audio_enabled = self.audio_enabled();

        if let Some(primary) = self.media.primary_mut() {
            play_guarded(primary, "primary");
        }
        for mask in self.media.masks_mut() {
            play_guarded(mask, "mask");
        }
        if audio_enabled {
            if let Some(audio) = self.media.audio_mut() {
                audio.set_current_time(audio_at);
                play_guarded(audio, "audio");
            }
        }
    }

    /// Pause everything in place.
    pub fn pause(&mut self) {
        for media in self.media.all_mut() {
            media.pause();
        }
        self.phase = AnimationPhase::Static;
        self.playing = false;
        self.motions.clear();
        info!("Playback paused");
    }

    /// Pause and rewind to the start. The audio track rewinds to its crop
    /// start.
    pub fn reset(&mut self) {
        let audio_start = self.audio_start();
        for media in self.media.all_mut() {
            media.pause();
            media.set_current_time(0.0);
        }
        if let Some(audio) = self.media.audio_mut() {
            audio.set_current_time(audio_start);
        }
        self.phase = AnimationPhase::Static;
        self.playing = false;
        self.motions.clear();
        info!("Playback reset");
    }

    /// Scrub to `t` seconds of primary media time.
    pub fn seek(&mut self, t: f64) {
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };
        let audio_at = t + self.audio_start();
        if let Some(primary) = self.media.primary_mut() {
            primary.set_current_time(t);
        }
        for mask in self.media.masks_mut() {
            let d = mask.duration();
            mask.set_current_time(loop_time(t, d));
        }
        if let Some(audio) = self.media.audio_mut() {
            audio.set_current_time(audio_at);
        }
        debug!(t, "Seeked");
    }

    /// Primary media time update. Mask videos that drifted past the
    /// tolerance are pulled back; returns how many were re-synced.
    pub fn on_time_update(&mut self) -> usize {
        let Some(t) = self.media.primary().map(|m| m.current_time()) else {
            return 0;
        };
        let tolerance = self.config.drift_tolerance_secs;
        let mut resynced = 0;
        for mask in self.media.masks_mut() {
            let expected = loop_time(t, mask.duration());
            let drift = (mask.current_time() - expected).abs();
            if drift > tolerance {
                trace!(drift, expected, "Re-syncing mask video");
                mask.set_current_time(expected);
                resynced += 1;
            }
        }
        resynced
    }

    /// The primary media reached its end.
    pub fn on_ended(&mut self) {
        self.phase = AnimationPhase::Static;
        self.playing = false;
        self.motions.clear();
        info!("Playback ended");
    }

    // ── Rendering queries ──────────────────────────────────────

    /// Render transform of an overlay. Overlays without an entrance
    /// animation, and every overlay while static, rest at zero offset.
    pub fn overlay_motion(&self, overlay_id: &str) -> OverlayMotion {
        match self.phase {
            AnimationPhase::Static => OverlayMotion::RESTING,
            _ => self
                .motions
                .get(overlay_id)
                .copied()
                .unwrap_or(OverlayMotion::RESTING),
        }
    }

    /// Eased pixel offset of an overlay at host time `now`.
    pub fn overlay_offset(&self, overlay_id: &str, now: f64) -> Vec2 {
        self.overlay_motion(overlay_id).offset_at(now)
    }

    // ── Background ─────────────────────────────────────────────

    /// The primary media's first frame is available (or failed to load).
    ///
    /// Updates the live background and returns a footer update when the
    /// footer has no explicit background of its own.
    pub fn on_primary_loaded(
        &mut self,
        frame: Result<&RgbaImage, MediaError>,
        metadata: &TemplateMetadata,
    ) -> Option<FooterPatch> {
        self.background = background_color(frame, self.config.fallback_color);
        debug!(color = %self.background, "Background color sampled");
        metadata
            .footer_config
            .background_color
            .is_none()
            .then_some(FooterPatch::BackgroundColor(Some(self.background)))
    }
}

fn play_guarded(media: &mut dyn MediaElement, role: &str) {
    if let Err(e) = media.play() {
        warn!(role, error = %e, "Media refused to play");
    }
}
