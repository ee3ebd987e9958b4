//! WCAG relative luminance and contrast ratio.
//!
//! # References
//!
//! - W3C (2008). *Web Content Accessibility Guidelines (WCAG) 2.0*,
//!   definitions of "relative luminance" and "contrast ratio".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Normalized channel value at or below which sRGB is treated as linear.
const LINEAR_THRESHOLD: f64 = 0.03928;

/// Luminance weights for the red, green and blue channels.
const WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Relative luminance of a color, in `[0, 1]`.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let linear = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= LINEAR_THRESHOLD {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    WEIGHTS[0] * linear(rgb.r) + WEIGHTS[1] * linear(rgb.g) + WEIGHTS[2] * linear(rgb.b)
}

/// Contrast ratio between two colors, `>= 1.0`. Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance level that a contrast ratio can satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// AA for large text (>= 3.0).
    AaLarge,
    /// AA for normal text (>= 4.5).
    AaNormal,
    /// AAA for normal text (>= 7.0).
    AaaNormal,
}

impl WcagLevel {
    /// All levels, lowest threshold first.
    pub const ALL: [Self; 3] = [Self::AaLarge, Self::AaNormal, Self::AaaNormal];

    /// Minimum ratio required for this level.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::AaLarge => 3.0,
            Self::AaNormal => 4.5,
            Self::AaaNormal => 7.0,
        }
    }

    /// Whether `ratio` satisfies this level.
    #[must_use]
    pub fn passes(self, ratio: f64) -> bool {
        ratio >= self.threshold()
    }

    /// Badge label, e.g. `AA Normal`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AaLarge => "AA Large",
            Self::AaNormal => "AA Normal",
            Self::AaaNormal => "AAA Normal",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every level `ratio` satisfies. Each check is independent.
#[must_use]
pub fn accessibility_levels(ratio: f64) -> Vec<WcagLevel> {
    WcagLevel::ALL.into_iter().filter(|level| level.passes(ratio)).collect()
}

/// Foreground/background contrast check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    /// Text color.
    pub foreground: Rgb,
    /// Background color.
    pub background: Rgb,
    /// Contrast ratio between the two.
    pub ratio: f64,
    /// Levels the ratio satisfies.
    pub levels: Vec<WcagLevel>,
}

impl ContrastReport {
    /// Evaluate a foreground/background pair.
    #[must_use]
    pub fn new(foreground: Rgb, background: Rgb) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground,
            background,
            ratio,
            levels: accessibility_levels(ratio),
        }
    }

    /// Whether the pair satisfies `level`.
    #[must_use]
    pub fn passes(&self, level: WcagLevel) -> bool {
        self.levels.contains(&level)
    }

    /// Ratio rendered as `4.50:1`.
    #[must_use]
    pub fn ratio_label(&self) -> String {
        format!("{:.2}:1", self.ratio)
    }
}
