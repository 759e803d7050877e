//! Postcraft Core - document model and coordinate system
//!
//! This crate provides the types shared by the template compositor:
//! - Percent geometry (every rect is relative to its containing box)
//! - Overlay elements, the footer and their partial updates
//! - Edit metadata (crop, filters) and the audio track config
//! - Preview layout (container fit, media box, footer box)
//! - Easing curves and preview configuration

pub mod color;
pub mod config;
pub mod document;
pub mod easing;
pub mod error;
pub mod footer;
pub mod geometry;
pub mod layout;
pub mod overlay;
pub mod strokes;

pub use color::Color;
pub use config::{PreviewConfig, SizeLimits};
pub use document::{
    AudioConfig, AudioCrop, CropPosition, CropSettings, EditMetadata, FilterAdjustments,
    FilterSettings, FooterPatch, OverlayPatch, SoftEdgeSettings, TemplateDocument,
    TemplateMetadata,
};
pub use easing::CubicBezier;
pub use error::{PostcraftError, Result};
pub use footer::{FooterConfig, FooterElements, FooterGeometry};
pub use geometry::{PercentRect, Rect, Vec2};
pub use layout::{crop_source_rect, fit_container, AspectRatio, CanvasSettings, PreviewLayout};
pub use overlay::{
    AnimationDirection, AnimationSpec, AvatarConfig, AvatarShape, OverlayElement, OverlayKind,
    SoftEdgeConfig, TextConfig,
};
pub use strokes::{Stroke, StrokeLog};
