//! Color-wheel harmonies at full saturation and half lightness.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{normalize_hue, Hsl, Rgb};
use crate::error::{Error, Result};

/// Saturation used for every harmony color.
pub const HARMONY_SATURATION: f64 = 100.0;

/// Lightness used for every harmony color.
pub const HARMONY_LIGHTNESS: f64 = 50.0;

/// Hue relationship on the color wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    /// `h`, `h + 180`.
    #[default]
    Complementary,
    /// `h - 30`, `h`, `h + 30`.
    Analogous,
    /// `h`, `h + 120`, `h + 240`.
    Triadic,
    /// `h`, `h + 150`, `h + 210`.
    SplitComplementary,
}

impl Harmony {
    /// All harmonies in display order.
    pub const ALL: [Self; 4] = [
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
        Self::SplitComplementary,
    ];

    /// Kebab-case harmony name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
        }
    }

    /// Hue offsets from the selected hue, in output order.
    #[must_use]
    pub const fn offsets(self) -> &'static [f64] {
        match self {
            Self::Complementary => &[0.0, 180.0],
            Self::Analogous => &[-30.0, 0.0, 30.0],
            Self::Triadic => &[0.0, 120.0, 240.0],
            Self::SplitComplementary => &[0.0, 150.0, 210.0],
        }
    }

    /// Hues of the harmony for `hue`, each normalized to `[0, 360)`.
    #[must_use]
    pub fn hues(self, hue: f64) -> Vec<f64> {
        self.offsets().iter().map(|offset| normalize_hue(hue + offset)).collect()
    }

    /// Harmony colors for `hue`.
    #[must_use]
    pub fn colors(self, hue: f64) -> Vec<Rgb> {
        self.hues(hue)
            .into_iter()
            .map(|h| Hsl::new(h, HARMONY_SATURATION, HARMONY_LIGHTNESS).to_rgb())
            .collect()
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Harmony {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|harmony| harmony.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownHarmony(s.to_string()))
    }
}

/// Hue under a point on the wheel, given its offset from the wheel center.
///
/// Screen coordinates: `dy` grows downward, so hue increases clockwise from
/// the positive x axis.
#[must_use]
pub fn hue_at_point(dx: f64, dy: f64) -> f64 {
    normalize_hue(dy.atan2(dx).to_degrees())
}
