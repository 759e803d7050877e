//! Named filter looks.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;
use crate::ops::FilterOp;
use FilterOp::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterPreset {
    #[default]
    Original,
    Aden,
    Clarendon,
    Crema,
    Gingham,
    Juno,
    Lark,
    Ludwig,
    Moon,
    Perpetua,
    Reyes,
    Slumber,
    Valencia,
    Willow,
}

impl FilterPreset {
    pub const ALL: [Self; 14] = [
        Self::Original,
        Self::Aden,
        Self::Clarendon,
        Self::Crema,
        Self::Gingham,
        Self::Juno,
        Self::Lark,
        Self::Ludwig,
        Self::Moon,
        Self::Perpetua,
        Self::Reyes,
        Self::Slumber,
        Self::Valencia,
        Self::Willow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Aden => "aden",
            Self::Clarendon => "clarendon",
            Self::Crema => "crema",
            Self::Gingham => "gingham",
            Self::Juno => "juno",
            Self::Lark => "lark",
            Self::Ludwig => "ludwig",
            Self::Moon => "moon",
            Self::Perpetua => "perpetua",
            Self::Reyes => "reyes",
            Self::Slumber => "slumber",
            Self::Valencia => "valencia",
            Self::Willow => "willow",
        }
    }

    /// The fixed operation chain of this look, applied in order.
    pub fn ops(self) -> &'static [FilterOp] {
        match self {
            Self::Original => &[],
            Self::Aden => &[HueRotate(-20.0), Contrast(0.9), Saturate(0.85), Brightness(1.2)],
            Self::Clarendon => &[Contrast(1.2), Saturate(1.35)],
            Self::Crema => &[
                Sepia(0.5),
                Contrast(1.25),
                Brightness(1.15),
                Saturate(0.9),
                HueRotate(-2.0),
            ],
            Self::Gingham => &[Brightness(1.05), HueRotate(-10.0)],
            Self::Juno => &[Sepia(0.35), Contrast(1.15), Brightness(1.15), Saturate(1.8)],
            Self::Lark => &[Contrast(0.9)],
            Self::Ludwig => &[Sepia(0.25), Contrast(1.05), Brightness(1.05), Saturate(2.0)],
            Self::Moon => &[Grayscale(1.0), Contrast(1.1), Brightness(1.1)],
            Self::Perpetua => &[Contrast(1.1), Brightness(1.25), Saturate(1.1)],
            Self::Reyes => &[Sepia(0.22), Brightness(1.1), Contrast(0.85), Saturate(0.75)],
            Self::Slumber => &[Saturate(0.66), Brightness(1.05)],
            Self::Valencia => &[Contrast(1.08), Brightness(1.08), Sepia(0.08)],
            Self::Willow => &[Grayscale(0.5), Contrast(0.95), Brightness(0.9)],
        }
    }
}

impl FromStr for FilterPreset {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.is_empty() {
            return Ok(Self::Original);
        }
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FilterError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
