//! Overlay elements: the positionable units drawn over the media.
//!
//! All variants share geometry, visibility and an entrance animation; the
//! variant payload only affects rendering and a few editor rules (aspect
//! lock, soft-edge painting).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;
use crate::geometry::PercentRect;
use crate::strokes::StrokeLog;

// ── Animation ──────────────────────────────────────────────────

/// Side of the media box an overlay enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationDirection {
    Top,
    Bottom,
    Left,
    Right,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
    #[default]
    None,
}

impl AnimationDirection {
    /// Unit signs of the entrance side: -1 for left/top, +1 for right/bottom.
    pub fn signs(self) -> (i8, i8) {
        match self {
            Self::Top => (0, -1),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::TopRight => (1, -1),
            Self::BottomRight => (1, 1),
            Self::BottomLeft => (-1, 1),
            Self::TopLeft => (-1, -1),
            Self::None => (0, 0),
        }
    }
}

/// Entrance animation descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpec {
    pub enabled: bool,
    pub direction: AnimationDirection,
    /// Transition duration in seconds; smaller is faster.
    pub speed: f32,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: AnimationDirection::None,
            speed: 1.0,
        }
    }
}

impl AnimationSpec {
    /// Transition duration in seconds, with unusable speeds treated as 1s.
    pub fn duration_secs(&self) -> f32 {
        if self.speed.is_finite() && self.speed > 0.0 {
            self.speed
        } else {
            1.0
        }
    }

    /// Whether playback should offset this overlay before revealing it.
    pub fn is_active(&self) -> bool {
        self.enabled && self.direction != AnimationDirection::None
    }
}

// ── Variant payloads ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarShape {
    #[default]
    Round,
    Square,
    Rectangle,
}

/// Feathering brush settings and the painted stroke history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoftEdgeConfig {
    pub enabled: bool,
    /// Brush radius in percent of the overlay's shorter side.
    pub brush_size: f32,
    /// Share of the brush radius (0-100) that fades out.
    pub blur_strength: f32,
    /// Erase strength in `[0, 1]`.
    pub opacity: f32,
    pub strokes: StrokeLog,
}

impl Default for SoftEdgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            brush_size: 20.0,
            blur_strength: 50.0,
            opacity: 1.0,
            strokes: StrokeLog::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarConfig {
    pub soft_edge_config: SoftEdgeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextConfig {
    pub content: String,
    pub font_size: f32,
    pub color: Color,
    pub font_weight: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: 16.0,
            color: Color::WHITE,
            font_weight: "bold".to_string(),
        }
    }
}

/// Variant-specific rendering payload, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverlayKind {
    #[serde(rename_all = "camelCase")]
    Avatar {
        #[serde(default)]
        shape: AvatarShape,
        #[serde(default)]
        avatar_config: AvatarConfig,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mask_video_url: Option<String>,
    },
    Logo,
    #[serde(rename_all = "camelCase")]
    Username {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_config: Option<TextConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mask_video_url: Option<String>,
    },
    Image {
        #[serde(default)]
        url: String,
    },
}

impl OverlayKind {
    pub fn avatar() -> Self {
        Self::Avatar {
            shape: AvatarShape::default(),
            avatar_config: AvatarConfig::default(),
            mask_video_url: None,
        }
    }

    pub fn username(text: impl Into<String>) -> Self {
        Self::Username {
            text: Some(text.into()),
            text_config: None,
            mask_video_url: None,
        }
    }

    /// The `type` discriminator as written in documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Avatar { .. } => "avatar",
            Self::Logo => "logo",
            Self::Username { .. } => "username",
            Self::Image { .. } => "image",
        }
    }
}

// ── Overlay element ────────────────────────────────────────────

/// A positionable overlay: shared geometry and animation plus a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayElement {
    pub id: String,
    #[serde(flatten)]
    pub geometry: PercentRect,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub animation: AnimationSpec,
    #[serde(flatten)]
    pub kind: OverlayKind,
}

fn visible_by_default() -> bool {
    true
}

impl OverlayElement {
    pub fn new(id: impl Into<String>, kind: OverlayKind, geometry: PercentRect) -> Self {
        Self {
            id: id.into(),
            geometry,
            visible: true,
            animation: AnimationSpec::default(),
            kind,
        }
    }

    /// A user image overlay with a fresh `image-<uuid>` id.
    pub fn new_image(url: impl Into<String>, geometry: PercentRect) -> Self {
        Self::new(
            format!("image-{}", Uuid::new_v4()),
            OverlayKind::Image { url: url.into() },
            geometry,
        )
    }

    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    /// Avatars and usernames keep their width/height ratio while resizing.
    pub fn is_aspect_locked(&self) -> bool {
        matches!(
            self.kind,
            OverlayKind::Avatar { .. } | OverlayKind::Username { .. }
        )
    }

    pub fn soft_edge(&self) -> Option<&SoftEdgeConfig> {
        match &self.kind {
            OverlayKind::Avatar { avatar_config, .. } => Some(&avatar_config.soft_edge_config),
            _ => None,
        }
    }

    pub fn soft_edge_mut(&mut self) -> Option<&mut SoftEdgeConfig> {
        match &mut self.kind {
            OverlayKind::Avatar { avatar_config, .. } => {
                Some(&mut avatar_config.soft_edge_config)
            }
            _ => None,
        }
    }

    /// Body drags on this overlay paint strokes instead of moving it.
    pub fn is_feathering(&self) -> bool {
        self.soft_edge().is_some_and(|cfg| cfg.enabled)
    }

    pub fn mask_video_url(&self) -> Option<&str> {
        match &self.kind {
            OverlayKind::Avatar { mask_video_url, .. }
            | OverlayKind::Username { mask_video_url, .. } => mask_video_url.as_deref(),
            _ => None,
        }
    }

    /// Text shown by a username overlay, preferring the structured config.
    pub fn display_text(&self) -> Option<&str> {
        match &self.kind {
            OverlayKind::Username {
                text, text_config, ..
            } => text_config
                .as_ref()
                .map(|c| c.content.as_str())
                .filter(|s| !s.is_empty())
                .or(text.as_deref()),
            _ => None,
        }
    }
}
