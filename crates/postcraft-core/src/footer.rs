//! The footer: a single region docked to the bottom of the canvas.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Which contact fields the footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterElements {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub social_icons: bool,
}

impl FooterElements {
    pub const ALL: Self = Self {
        name: true,
        email: true,
        phone: true,
        social_icons: true,
    };
}

impl Default for FooterElements {
    fn default() -> Self {
        Self::ALL
    }
}

/// Horizontal placement and height of the footer, in percent of the canvas.
///
/// The vertical position is implied: the footer's bottom edge is the
/// canvas's bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterGeometry {
    pub x_percent: f32,
    pub w_percent: f32,
    pub height_percent: f32,
}

impl FooterGeometry {
    pub fn right(self) -> f32 {
        self.x_percent + self.w_percent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterConfig {
    pub enabled: bool,
    pub show_elements: FooterElements,
    /// Explicit background; when unset the preview's dominant color is used.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::color::lenient_optional"
    )]
    pub background_color: Option<Color>,
    pub height_percent: f32,
    pub w_percent: f32,
    pub x_percent: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_video_url: Option<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            show_elements: FooterElements::ALL,
            background_color: None,
            height_percent: 15.0,
            w_percent: 100.0,
            x_percent: 0.0,
            mask_video_url: None,
        }
    }
}

impl FooterConfig {
    /// Toggle the footer.
    ///
    /// Enabling re-forces every footer element on; the editor offers no
    /// per-element toggles.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.show_elements = FooterElements::ALL;
        }
    }

    pub fn geometry(&self) -> FooterGeometry {
        FooterGeometry {
            x_percent: self.x_percent,
            w_percent: self.w_percent,
            height_percent: self.height_percent,
        }
    }

    pub fn set_geometry(&mut self, geometry: FooterGeometry) {
        self.x_percent = geometry.x_percent;
        self.w_percent = geometry.w_percent;
        self.height_percent = geometry.height_percent;
    }

    /// Share of the canvas height taken away from the media box.
    pub fn reserved_height_percent(&self) -> f32 {
        if self.enabled {
            self.height_percent.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}
