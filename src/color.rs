//! Color types and color space conversions.
//!
//! [`Rgb`] is the canonical representation: three 8-bit sRGB channels. Hex,
//! HSL and HSV are derived views computed on demand.
//!
//! # Rounding
//!
//! [`Rgb::to_hsl`] and [`Rgb::to_hsv`] round hue to whole degrees and the
//! percentages to whole percent, which is what a picker displays. Converting
//! those rounded views back to RGB therefore drifts by up to
//! [`HSL_ROUND_TRIP_TOLERANCE`] / [`HSV_ROUND_TRIP_TOLERANCE`] per channel.
//! The unrounded views ([`Rgb::to_hsl_precise`], [`Rgb::to_hsv_precise`])
//! round-trip within ±1.
//!
//! # References
//!
//! - Smith, A. R. (1978). "Color Gamut Transform Pairs." *SIGGRAPH '78*, 12-19.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Worst-case per-channel drift of `hsl_to_hex(rgb_to_hsl(c))`.
pub const HSL_ROUND_TRIP_TOLERANCE: u8 = 5;

/// Worst-case per-channel drift of `hsv_to_hex(rgb_to_hsv(c))`.
pub const HSV_ROUND_TRIP_TOLERANCE: u8 = 3;

/// Opaque 8-bit sRGB color.
///
/// Serializes as an uppercase `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from unvalidated integer channels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any channel is outside 0-255.
    pub fn checked(r: i64, g: i64, b: i64) -> Result<Self> {
        let channel = |field: &'static str, value: i64| {
            u8::try_from(value).map_err(|_| Error::out_of_range(field, value as f64, 0.0, 255.0))
        };
        Ok(Self::new(channel("red", r)?, channel("green", g)?, channel("blue", b)?))
    }

    /// Parse a `#RRGGBB` / `RRGGBB` hex string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHex`] unless the input is exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        hex_to_rgb(hex)
    }

    /// Format as uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// Rounded HSL view.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// Rounded HSV view.
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }

    /// Unrounded HSL view.
    #[must_use]
    pub fn to_hsl_precise(self) -> Hsl {
        let (r, g, b) = self.unit();
        let (max, min) = (max3(r, g, b), min3(r, g, b));
        let l = (max + min) / 2.0;

        if self.is_achromatic() {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        Hsl::new(self.hue_degrees(d), s * 100.0, l * 100.0)
    }

    /// Unrounded HSV view.
    #[must_use]
    pub fn to_hsv_precise(self) -> Hsv {
        let (r, g, b) = self.unit();
        let (max, min) = (max3(r, g, b), min3(r, g, b));
        let d = max - min;

        let s = if max == 0.0 { 0.0 } else { d / max };
        let h = if self.is_achromatic() { 0.0 } else { self.hue_degrees(d) };
        Hsv::new(h, s * 100.0, max * 100.0)
    }

    /// CSS functional notation, e.g. `rgb(46, 139, 87)`.
    #[must_use]
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Attach an alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    fn unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    fn is_achromatic(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Hue in degrees for a chromatic color with chroma `d` (unit scale).
    fn hue_degrees(self, d: f64) -> f64 {
        let (r, g, b) = self.unit();
        let max = self.r.max(self.g).max(self.b);

        let sextant = if max == self.r {
            (g - b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        sextant * 60.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        hex_to_rgb(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl From<Rgba> for Rgb {
    fn from(rgba: Rgba) -> Self {
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Drop the alpha channel.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, rounded per channel.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;
        let mix = |a: u8, b: u8| (f32::from(a) * inv_t + f32::from(b) * t).round() as u8;

        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(255)
    }
}

/// HSL color: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue (0.0-360.0 degrees).
    pub h: f64,
    /// Saturation (0.0-100.0).
    pub s: f64,
    /// Lightness (0.0-100.0).
    pub l: f64,
}

impl Hsl {
    /// Create a new HSL color.
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Create an HSL color from unvalidated input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if hue is not finite or a percentage is
    /// outside 0-100.
    pub fn checked(h: f64, s: f64, l: f64) -> Result<Self> {
        check_hue(h)?;
        check_percent("saturation", s)?;
        check_percent("lightness", l)?;
        Ok(Self::new(h, s, l))
    }

    /// Convert to RGB, rounding each channel.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = normalize_hue(self.h) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgb::new(unit_to_channel(r), unit_to_channel(g), unit_to_channel(b))
    }

    /// Convert to uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    /// CSS functional notation, e.g. `hsl(146, 50%, 36%)`.
    #[must_use]
    pub fn css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

/// HSV color: hue in degrees, saturation and value in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue (0.0-360.0 degrees).
    pub h: f64,
    /// Saturation (0.0-100.0).
    pub s: f64,
    /// Value (0.0-100.0).
    pub v: f64,
}

impl Hsv {
    /// Create a new HSV color.
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Create an HSV color from unvalidated input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if hue is not finite or a percentage is
    /// outside 0-100.
    pub fn checked(h: f64, s: f64, v: f64) -> Result<Self> {
        check_hue(h)?;
        check_percent("saturation", s)?;
        check_percent("value", v)?;
        Ok(Self::new(h, s, v))
    }

    /// Convert to RGB using the six 60° hue sectors, rounding each channel.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = normalize_hue(self.h) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let v = (self.v / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h * 6.0).floor() as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(unit_to_channel(r + m), unit_to_channel(g + m), unit_to_channel(b + m))
    }

    /// Convert to uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv.to_rgb()
    }
}

// ============================================================================
// Free-function conversions
// ============================================================================

/// Whether `hex` is exactly six hex digits, with an optional leading `#`.
#[must_use]
pub fn is_valid_hex(hex: &str) -> bool {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a hex color string.
///
/// # Errors
///
/// Returns [`Error::InvalidHex`] unless the input is exactly six hex digits
/// with an optional leading `#`.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    if !is_valid_hex(hex) {
        return Err(Error::InvalidHex(hex.to_string()));
    }
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidHex(hex.to_string()))
    };

    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format a color as uppercase `#RRGGBB`.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_string()
}

/// Convert to HSL with hue rounded to whole degrees and s/l to whole percent.
///
/// Achromatic colors have hue and saturation 0.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let precise = rgb.to_hsl_precise();
    Hsl::new(round_hue(precise.h), precise.s.round(), precise.l.round())
}

/// Convert HSL to uppercase `#RRGGBB`.
#[must_use]
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_hex()
}

/// Convert to HSV with hue rounded to whole degrees and s/v to whole percent.
#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let precise = rgb.to_hsv_precise();
    Hsv::new(round_hue(precise.h), precise.s.round(), precise.v.round())
}

/// Convert HSV to uppercase `#RRGGBB`.
#[must_use]
pub fn hsv_to_hex(hsv: Hsv) -> String {
    hsv.to_hex()
}

/// Normalize a hue angle to `[0, 360)`. Non-finite input maps to 0.
#[must_use]
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let h = hue.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn round_hue(hue: f64) -> f64 {
    hue.round() % 360.0
}

fn unit_to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn check_hue(h: f64) -> Result<()> {
    if h.is_finite() {
        Ok(())
    } else {
        Err(Error::out_of_range("hue", h, 0.0, 360.0))
    }
}

fn check_percent(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::out_of_range(field, value, 0.0, 100.0))
    }
}

fn max3(a: f64, b: f64, c: f64) -> f64 {
    a.max(b).max(c)
}

fn min3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).min(c)
}


// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn max_drift(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    fn any_rgb() -> impl Strategy<Value = Rgb> {
        any::<[u8; 3]>().prop_map(|[r, g, b]| Rgb::new(r, g, b))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Hex text survives parse and format, case-normalized to uppercase.
        #[test]
        fn prop_hex_round_trip(hex in "[0-9a-fA-F]{6}", hash in any::<bool>()) {
            let input = if hash { format!("#{hex}") } else { hex.clone() };
            let rgb = hex_to_rgb(&input).unwrap();
            prop_assert_eq!(rgb_to_hex(rgb), format!("#{}", hex.to_uppercase()));
        }

        /// Integer channels survive format and parse exactly.
        #[test]
        fn prop_rgb_round_trip(rgb in any_rgb()) {
            prop_assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)).unwrap(), rgb);
        }

        /// Unrounded HSL round-trips within one unit per channel.
        #[test]
        fn prop_precise_hsl_round_trip(rgb in any_rgb()) {
            prop_assert!(max_drift(rgb, rgb.to_hsl_precise().to_rgb()) <= 1);
        }

        /// Unrounded HSV round-trips within one unit per channel.
        #[test]
        fn prop_precise_hsv_round_trip(rgb in any_rgb()) {
            prop_assert!(max_drift(rgb, rgb.to_hsv_precise().to_rgb()) <= 1);
        }

        /// Rounded HSL drift never exceeds the documented tolerance.
        #[test]
        fn prop_rounded_hsl_round_trip(rgb in any_rgb()) {
            prop_assert!(max_drift(rgb, hex_to_rgb(&hsl_to_hex(rgb_to_hsl(rgb))).unwrap()) <= HSL_ROUND_TRIP_TOLERANCE);
        }

        /// Rounded HSV drift never exceeds the documented tolerance.
        #[test]
        fn prop_rounded_hsv_round_trip(rgb in any_rgb()) {
            prop_assert!(max_drift(rgb, hex_to_rgb(&hsv_to_hex(rgb_to_hsv(rgb))).unwrap()) <= HSV_ROUND_TRIP_TOLERANCE);
        }

        /// Gray levels round-trip within one unit even through rounded views.
        #[test]
        fn prop_gray_round_trip_within_one(level in any::<u8>()) {
            let gray = Rgb::new(level, level, level);
            prop_assert!(max_drift(gray, rgb_to_hsl(gray).to_rgb()) <= 1);
            prop_assert!(max_drift(gray, rgb_to_hsv(gray).to_rgb()) <= 1);
        }

        /// Rounded views stay inside their documented domains.
        #[test]
        fn prop_views_in_domain(rgb in any_rgb()) {
            let hsl = rgb_to_hsl(rgb);
            prop_assert!((0.0..360.0).contains(&hsl.h));
            prop_assert!((0.0..=100.0).contains(&hsl.s));
            prop_assert!((0.0..=100.0).contains(&hsl.l));
            let hsv = rgb_to_hsv(rgb);
            prop_assert!((0.0..360.0).contains(&hsv.h));
            prop_assert!((0.0..=100.0).contains(&hsv.s));
            prop_assert!((0.0..=100.0).contains(&hsv.v));
        }
    }
}
