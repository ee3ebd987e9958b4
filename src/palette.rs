//! Rule-based palettes derived from a base color.
//!
//! Every scheme starts from the base color's rounded HSL view and varies
//! hue, saturation or lightness by fixed steps. Shifted lightness values
//! are clamped to `[20, 80]`; the base lightness itself is kept as is.
//!
//! | Scheme | Colors |
//! |--------|--------|
//! | monochromatic | 5 |
//! | analogous | 5 |
//! | complementary | 6 |
//! | triadic | 9 |
//! | tetradic | 8 |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::color::{normalize_hue, Hsl, Rgb};
use crate::error::{Error, Result};

/// Number of colors the random palette shows by default.
pub const DEFAULT_RANDOM_COUNT: usize = 12;

const MIN_LIGHTNESS: f64 = 20.0;
const MAX_LIGHTNESS: f64 = 80.0;
const MIN_TETRADIC_SATURATION: f64 = 30.0;

/// Palette generation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteScheme {
    /// Base hue at five lightness levels.
    #[default]
    Monochromatic,
    /// Hues within ±60° of the base.
    Analogous,
    /// Base and opposite hue, three lightness levels each.
    Complementary,
    /// Three hues 120° apart, three lightness levels each.
    Triadic,
    /// Four hues 90° apart, muted and base saturation.
    Tetradic,
}

impl PaletteScheme {
    /// All schemes in display order.
    pub const ALL: [Self; 5] = [
        Self::Monochromatic,
        Self::Analogous,
        Self::Complementary,
        Self::Triadic,
        Self::Tetradic,
    ];

    /// Lowercase scheme name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
        }
    }

    /// Number of colors the scheme produces.
    #[must_use]
    pub const fn color_count(self) -> usize {
        match self {
            Self::Monochromatic | Self::Analogous => 5,
            Self::Complementary => 6,
            Self::Triadic => 9,
            Self::Tetradic => 8,
        }
    }
}

impl fmt::Display for PaletteScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownScheme(s.to_string()))
    }
}

/// Generate the colors of `scheme` for `base`.
#[must_use]
pub fn generate_palette(base: Rgb, scheme: PaletteScheme) -> Vec<Rgb> {
    let Hsl { h, s, l } = base.to_hsl();
    let at = |hue: f64, sat: f64, light: f64| Hsl::new(normalize_hue(hue), sat, light).to_rgb();
    let darker = |d: f64| (l - d).max(MIN_LIGHTNESS);
    let lighter = |d: f64| (l + d).min(MAX_LIGHTNESS);

    match scheme {
        PaletteScheme::Monochromatic => [20.0, 35.0, 50.0, 65.0, 80.0]
            .into_iter()
            .map(|light| at(h, s, light))
            .collect(),
        PaletteScheme::Analogous => [-60.0, -30.0, 0.0, 30.0, 60.0]
            .into_iter()
            .map(|offset| at(h + offset, s, l))
            .collect(),
        PaletteScheme::Complementary => [0.0, 180.0]
            .into_iter()
            .flat_map(|offset| [darker(20.0), l, lighter(20.0)].map(|light| at(h + offset, s, light)))
            .collect(),
        PaletteScheme::Triadic => [0.0, 120.0, 240.0]
            .into_iter()
            .flat_map(|offset| [darker(10.0), l, lighter(10.0)].map(|light| at(h + offset, s, light)))
            .collect(),
        PaletteScheme::Tetradic => {
            let muted = (s - 20.0).max(MIN_TETRADIC_SATURATION);
            [0.0, 90.0, 180.0, 270.0]
                .into_iter()
                .flat_map(|offset| [at(h + offset, muted, l), at(h + offset, s, l)])
                .collect()
        }
    }
}

/// `n` uniformly random colors.
pub fn random_palette<R: Rng>(rng: &mut R, n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|_| {
            let [r, g, b]: [u8; 3] = rng.random();
            Rgb::new(r, g, b)
        })
        .collect()
}

// ============================================================================
// Palette
// ============================================================================

/// A generated color with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// The color.
    pub color: Rgb,
    /// Display label, `Color 1` onward.
    pub label: String,
}

/// A labelled palette generated from a base color.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Generation rule.
    pub scheme: PaletteScheme,
    /// Input color.
    pub base: Rgb,
    /// Generated colors in scheme order.
    pub entries: Vec<PaletteEntry>,
    /// When the palette was generated.
    pub created_at: OffsetDateTime,
}

impl Palette {
    /// Generate a palette stamped with the current UTC time.
    #[must_use]
    pub fn generate(base: Rgb, scheme: PaletteScheme) -> Self {
        Self::generate_at(base, scheme, OffsetDateTime::now_utc())
    }

    /// Generate a palette with an explicit timestamp.
    #[must_use]
    pub fn generate_at(base: Rgb, scheme: PaletteScheme, created_at: OffsetDateTime) -> Self {
        let entries = generate_palette(base, scheme)
            .into_iter()
            .enumerate()
            .map(|(i, color)| PaletteEntry {
                color,
                label: format!("Color {}", i + 1),
            })
            .collect();

        Self {
            scheme,
            base,
            entries,
            created_at,
        }
    }

    /// Colors without labels.
    #[must_use]
    pub fn colors(&self) -> Vec<Rgb> {
        self.entries.iter().map(|entry| entry.color).collect()
    }

    /// Build the JSON export document.
    #[must_use]
    pub fn export(&self) -> PaletteExport {
        PaletteExport {
            palette_type: self.scheme,
            base_color: self.base.to_hex(),
            colors: self
                .entries
                .iter()
                .map(|entry| ExportedColor {
                    hex: entry.color.to_hex(),
                    name: entry.label.clone(),
                })
                .collect(),
            created_at: self
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "invalid-timestamp".into()),
        }
    }
}

// ============================================================================
// Export
// ============================================================================

/// One color in an exported palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedColor {
    /// Uppercase `#RRGGBB`.
    pub hex: String,
    /// Display label.
    pub name: String,
}

/// Exported palette document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteExport {
    /// Scheme name.
    #[serde(rename = "type")]
    pub palette_type: PaletteScheme,
    /// Base color as `#RRGGBB`.
    pub base_color: String,
    /// Generated colors.
    pub colors: Vec<ExportedColor>,
    /// RFC 3339 creation time.
    pub created_at: String,
}

impl PaletteExport {
    /// Pretty-printed JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Creation time in Unix milliseconds, read back from `created_at`.
    ///
    /// Returns `None` if `created_at` is not RFC 3339.
    #[must_use]
    pub fn created_millis(&self) -> Option<i64> {
        let created = OffsetDateTime::parse(&self.created_at, &Rfc3339).ok()?;
        i64::try_from(created.unix_timestamp_nanos() / 1_000_000).ok()
    }

    /// Download file name, `color-palette-<type>-<unixMillis>.json`.
    ///
    /// An unparseable `created_at` gives millis 0.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "color-palette-{}-{}.json",
            self.palette_type,
            self.created_millis().unwrap_or(0)
        )
    }

    /// Write the document into `dir` under [`Self::file_name`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_json()?)?;
        info!(path = %path.display(), colors = self.colors.len(), "exported palette");
        Ok(path)
    }
}
