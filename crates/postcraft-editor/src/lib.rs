//! Postcraft Editor - pointer-driven editing of the preview
//!
//! Provides:
//! - Move and resize gestures with aspect lock and containment
//! - Footer docking gestures
//! - Soft-edge brush painting on avatars
//! - Hit testing of overlays, resize handles and the footer
//! - The single callback funnel into the host's metadata

pub mod actions;
pub mod brush;
pub mod gesture;
pub mod handles;
pub mod surface;

pub use actions::{EditorAction, MetadataSink};
pub use brush::{BrushCursor, BrushSession, BrushSettings};
pub use gesture::{FooterGesture, GestureMode, OverlayGesture};
pub use handles::{hit_test_handle, Handle};
pub use surface::{HitTarget, PointerEvent, PreviewSurface};
