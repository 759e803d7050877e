//! Postcraft Playback - preview playback coordination
//!
//! Architecture:
//! - `MediaRegistry`: primary media, overlay mask videos, footer mask and
//!   the audio track, each optional
//! - `animation`: entrance offsets and eased transitions
//! - `background`: dominant-color sampling of the first frame
//! - `PlaybackCoordinator`: the static/reset/animating state machine, seek
//!   propagation and drift correction

pub mod animation;
pub mod background;
pub mod coordinator;
pub mod error;
pub mod media;

pub use animation::{initial_offset, initial_offset_for, AnimationPhase, OverlayMotion, Transition};
pub use background::{background_color, dominant_color};
pub use coordinator::PlaybackCoordinator;
pub use error::MediaError;
pub use media::{loop_time, BoxedMedia, MediaElement, MediaRegistry, SimulatedMedia};
