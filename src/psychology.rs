//! Color psychology notes by hue band.
//!
//! Seven fixed bands cover the wheel. Red spans the wrap point.

use std::fmt;

use serde::Serialize;

use crate::color::normalize_hue;

/// Hue band used for psychology lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HueBand {
    /// `[330, 360)` and `[0, 30)`.
    Red,
    /// `[30, 60)`.
    Orange,
    /// `[60, 120)`.
    Yellow,
    /// `[120, 180)`.
    Green,
    /// `[180, 240)`.
    Cyan,
    /// `[240, 300)`.
    Blue,
    /// `[300, 330)`.
    Violet,
}

impl HueBand {
    /// Band containing `hue`, after normalizing it to `[0, 360)`.
    #[must_use]
    pub fn for_hue(hue: f64) -> Self {
        match normalize_hue(hue) {
            h if h < 30.0 => Self::Red,
            h if h < 60.0 => Self::Orange,
            h if h < 120.0 => Self::Yellow,
            h if h < 180.0 => Self::Green,
            h if h < 240.0 => Self::Cyan,
            h if h < 300.0 => Self::Blue,
            h if h < 330.0 => Self::Violet,
            _ => Self::Red,
        }
    }

    /// Psychology record for this band.
    #[must_use]
    pub const fn psychology(self) -> &'static ColorPsychology {
        match self {
            Self::Red => &RED,
            Self::Orange => &ORANGE,
            Self::Yellow => &YELLOW,
            Self::Green => &GREEN,
            Self::Cyan => &CYAN,
            Self::Blue => &BLUE,
            Self::Violet => &VIOLET,
        }
    }
}

impl fmt::Display for HueBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.psychology().name)
    }
}

/// What a color family tends to evoke and where it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPsychology {
    /// Family name.
    pub name: &'static str,
    /// Emotional associations.
    pub emotions: &'static str,
    /// Typical uses.
    pub usage: &'static str,
    /// Cultural meanings.
    pub cultural: &'static str,
}

const RED: ColorPsychology = ColorPsychology {
    name: "Red",
    emotions: "Passion, energy, excitement, love, danger",
    usage: "Call-to-action buttons, warnings, restaurants, fashion",
    cultural: "Western cultures: love and danger. China: luck and prosperity.",
};

const ORANGE: ColorPsychology = ColorPsychology {
    name: "Orange",
    emotions: "Warmth, enthusiasm, creativity, friendliness",
    usage: "Toys, sports brands, creative industries, autumn themes",
    cultural: "Buddhism: enlightenment. Halloween: autumn and harvest.",
};

const YELLOW: ColorPsychology = ColorPsychology {
    name: "Yellow",
    emotions: "Happiness, optimism, clarity, attention",
    usage: "Warning signs, children's products, summer themes, taxis",
    cultural: "China: imperial power. Western: caution and cheerfulness.",
};

const GREEN: ColorPsychology = ColorPsychology {
    name: "Green",
    emotions: "Nature, growth, harmony, freshness, money",
    usage: "Environment, health, finance, organic products",
    cultural: "Islam: sacred color. Western: nature and money.",
};

const CYAN: ColorPsychology = ColorPsychology {
    name: "Cyan/Turquoise",
    emotions: "Calm, clarity, refreshment, technology",
    usage: "Tech companies, wellness, water themes, modern designs",
    cultural: "Egypt: protection. Modern: digital innovation.",
};

const BLUE: ColorPsychology = ColorPsychology {
    name: "Blue",
    emotions: "Trust, stability, professionalism, calm",
    usage: "Corporations, social media, healthcare, technology",
    cultural: "Universal: trust and stability. Greece: national color.",
};

const VIOLET: ColorPsychology = ColorPsychology {
    name: "Violet/Purple",
    emotions: "Luxury, creativity, spirituality, mystery",
    usage: "Luxury brands, cosmetics, spirituality, art",
    cultural: "Roman Empire: royalty. Modern: creativity and luxury.",
};

/// Psychology record for the band containing `hue`.
#[must_use]
pub fn psychology_for_hue(hue: f64) -> &'static ColorPsychology {
    HueBand::for_hue(hue).psychology()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let cases = [
            (0.0, HueBand::Red),
            (29.9, HueBand::Red),
            (30.0, HueBand::Orange),
            (60.0, HueBand::Yellow),
            (119.0, HueBand::Yellow),
            (120.0, HueBand::Green),
            (180.0, HueBand::Cyan),
            (240.0, HueBand::Blue),
            (300.0, HueBand::Violet),
            (329.9, HueBand::Violet),
            (330.0, HueBand::Red),
            (359.9, HueBand::Red),
        ];
        for (hue, band) in cases {
            assert_eq!(HueBand::for_hue(hue), band, "hue {hue}");
        }
    }

    #[test]
    fn test_hue_normalized_first() {
        assert_eq!(HueBand::for_hue(360.0), HueBand::Red);
        assert_eq!(HueBand::for_hue(-60.0), HueBand::Violet);
        assert_eq!(HueBand::for_hue(-90.0), HueBand::Blue);
        assert_eq!(HueBand::for_hue(400.0), HueBand::Orange);
    }

    #[test]
    fn test_lookup_records() {
        assert_eq!(psychology_for_hue(146.0).name, "Green");
        assert_eq!(psychology_for_hue(210.0).name, "Cyan/Turquoise");
        assert!(psychology_for_hue(250.0).emotions.contains("Trust"));
        assert_eq!(HueBand::Violet.to_string(), "Violet/Purple");
    }

    #[test]
    fn test_every_record_filled() {
        for hue in (0..360).step_by(15) {
            let record = psychology_for_hue(f64::from(hue));
            assert!(!record.name.is_empty());
            assert!(!record.emotions.is_empty());
            assert!(!record.usage.is_empty());
            assert!(!record.cultural.is_empty());
        }
    }
}
