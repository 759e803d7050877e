//! Media elements and the registry that owns them.
//!
//! Elements are registered under a logical role instead of being looked up
//! by string from the outside. Every role is optional; a missing element is
//! skipped by every control operation.

use smallvec::SmallVec;

use crate::error::MediaError;

/// A self-clocked media element (video, audio or a looping mask video).
pub trait MediaElement {
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, secs: f64);

    /// Seconds; `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    fn muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);
}

/// `t` wrapped into a loop of `duration`, or `t` itself when the duration is
/// unknown.
pub fn loop_time(t: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 => t.rem_euclid(d),
        _ => t,
    }
}

pub type BoxedMedia = Box<dyn MediaElement>;

/// The media of one preview instance.
#[derive(Default)]
pub struct MediaRegistry {
    primary: Option<BoxedMedia>,
    /// Mask videos keyed by overlay id; a preview rarely has more than three.
    overlay_masks: SmallVec<[(String, BoxedMedia); 3]>,
    footer_mask: Option<BoxedMedia>,
    audio: Option<BoxedMedia>,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the primary video, or detach it with `None`.
    pub fn set_primary(&mut self, media: Option<BoxedMedia>) {
        self.primary = media;
    }

    /// Attach the footer's mask video.
    pub fn set_footer_mask(&mut self, media: Option<BoxedMedia>) {
        self.footer_mask = media;
    }

    /// Attach the separate audio track.
    pub fn set_audio(&mut self, media: Option<BoxedMedia>) {
        self.audio = media;
    }

    /// Attach or replace the mask video of an overlay.
    pub fn set_overlay_mask(&mut self, overlay_id: &str, media: BoxedMedia) {
        match self.overlay_masks.iter_mut().find(|(id, _)| id == overlay_id) {
            Some(slot) => slot.1 = media,
            None => self.overlay_masks.push((overlay_id.to_string(), media)),
        }
    }

    pub fn remove_overlay_mask(&mut self, overlay_id: &str) -> Option<BoxedMedia> {
        let idx = self.overlay_masks.iter().position(|(id, _)| id == overlay_id)?;
        Some(self.overlay_masks.remove(idx).1)
    }

    pub fn primary(&self) -> Option<&dyn MediaElement> {
        self.primary.as_deref()
    }

    pub fn primary_mut(&mut self) -> Option<&mut (dyn MediaElement + 'static)> {
        self.primary.as_deref_mut()
    }

    pub fn audio(&self) -> Option<&dyn MediaElement> {
        self.audio.as_deref()
    }

    pub fn audio_mut(&mut self) -> Option<&mut (dyn MediaElement + 'static)> {
        self.audio.as_deref_mut()
    }

    pub fn footer_mask(&self) -> Option<&dyn MediaElement> {
        self.footer_mask.as_deref()
    }

    pub fn overlay_mask(&self, overlay_id: &str) -> Option<&dyn MediaElement> {
        self.overlay_masks
            .iter()
            .find(|(id, _)| id == overlay_id)
            .map(|(_, m)| &**m)
    }

    /// Overlay mask videos followed by the footer mask video.
    pub fn masks_mut(&mut self) -> impl Iterator<Item = &mut (dyn MediaElement + 'static)> {
        self.overlay_masks
            .iter_mut()
            .map(|(_, m)| &mut **m)
            .chain(self.footer_mask.as_deref_mut())
    }

    /// Every registered element.
    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut (dyn MediaElement + 'static)> {
        self.primary
            .as_deref_mut()
            .into_iter()
            .chain(
                self.overlay_masks
                    .iter_mut()
                    .map(|(_, m)| &mut **m),
            )
            .chain(self.footer_mask.as_deref_mut())
            .chain(self.audio.as_deref_mut())
    }
}

/// A media element driven by an explicit clock, for previews without a
/// decoder and for tests.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    duration: Option<f64>,
    time: f64,
    paused: bool,
    volume: f32,
    muted: bool,
    looping: bool,
    /// Playback rate relative to the host clock; off-1.0 rates drift.
    pub rate: f64,
    /// Reject `play` like a browser blocking autoplay.
    pub reject_play: bool,
}

impl SimulatedMedia {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            duration,
            time: 0.0,
            paused: true,
            volume: 1.0,
            muted: false,
            looping: false,
            rate: 1.0,
            reject_play: false,
        }
    }

    /// A mask video that wraps at its end.
    pub fn looping(duration: f64) -> Self {
        Self {
            looping: true,
            ..Self::new(Some(duration))
        }
    }

    /// Advance the clock by `dt` host seconds. Returns `true` when a
    /// non-looping element reached its end during this step.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.paused {
            return false;
        }
        let t = self.time + dt * self.rate;
        match self.duration {
            Some(d) if self.looping => {
                self.time = loop_time(t, Some(d));
                false
            }
            Some(d) if t >= d => {
                self.time = d;
                self.paused = true;
                true
            }
            _ => {
                self.time = t;
                false
            }
        }
    }
}

impl MediaElement for SimulatedMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        if self.reject_play {
            return Err(MediaError::PlayRejected("autoplay blocked".into()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, secs: f64) {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self.time = match self.duration {
            Some(d) => secs.min(d),
            None => secs,
        };
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
