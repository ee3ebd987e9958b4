//! WebAssembly bindings for chromakit.
//!
//! Exposes the color math, extraction and palette rules to a browser front
//! end. Colors cross the boundary as `#RRGGBB` strings; structured records
//! are returned as JSON text.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { extract_colors, generate_palette, contrast_ratio } from 'chromakit';
//!
//! await init();
//!
//! const ctx = canvas.getContext('2d');
//! const { data } = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const dominant = JSON.parse(extract_colors(data, 8));
//!
//! const palette = generate_palette('#2E8B57', 'triadic');
//! const ratio = contrast_ratio('#FFFFFF', palette[0]);
//! ```

use std::fmt::Display;

use rand::rngs::StdRng;
use rand::SeedableRng;
use time::OffsetDateTime;
use wasm_bindgen::prelude::*;

use crate::color::{self, Hsl, Hsv, Rgb};
use crate::contrast;
use crate::error;
use crate::extract::{DominantColorExtractor, ExtractorConfig};
use crate::gradient::{Gradient, GradientDirection};
use crate::harmony::{self, Harmony};
use crate::palette::{self, Palette, PaletteExport, PaletteScheme};
use crate::psychology;

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the WASM module.
///
/// Call this before using any other functions.
#[wasm_bindgen(start)]
pub fn init() {
    // WASM module initialized
}

fn js_err(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ============================================================================
// Conversions
// ============================================================================

/// Parse a hex color into `[r, g, b]`.
#[wasm_bindgen]
pub fn hex_to_rgb(hex: &str) -> Result<Vec<u8>, JsValue> {
    color::hex_to_rgb(hex).map(|c| c.to_array().to_vec()).map_err(js_err)
}

/// Format channels as `#RRGGBB`.
#[wasm_bindgen]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    color::rgb_to_hex(Rgb::new(r, g, b))
}

/// Rounded `[h, s, l]` of a hex color.
#[wasm_bindgen]
pub fn hex_to_hsl(hex: &str) -> Result<Vec<f64>, JsValue> {
    let Hsl { h, s, l } = color::hex_to_rgb(hex).map_err(js_err)?.to_hsl();
    Ok(vec![h, s, l])
}

/// Rounded `[h, s, v]` of a hex color.
#[wasm_bindgen]
pub fn hex_to_hsv(hex: &str) -> Result<Vec<f64>, JsValue> {
    let Hsv { h, s, v } = color::hex_to_rgb(hex).map_err(js_err)?.to_hsv();
    Ok(vec![h, s, v])
}

/// HSL to `#RRGGBB`. Saturation and lightness must be within 0-100.
#[wasm_bindgen]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> Result<String, JsValue> {
    Hsl::checked(h, s, l).map(color::hsl_to_hex).map_err(js_err)
}

/// HSV to `#RRGGBB`. Saturation and value must be within 0-100.
#[wasm_bindgen]
pub fn hsv_to_hex(h: f64, s: f64, v: f64) -> Result<String, JsValue> {
    Hsv::checked(h, s, v).map(color::hsv_to_hex).map_err(js_err)
}

// ============================================================================
// Contrast
// ============================================================================

/// WCAG contrast ratio between two hex colors.
#[wasm_bindgen]
pub fn contrast_ratio(foreground: &str, background: &str) -> Result<f64, JsValue> {
    let fg = color::hex_to_rgb(foreground).map_err(js_err)?;
    let bg = color::hex_to_rgb(background).map_err(js_err)?;
    Ok(contrast::contrast_ratio(fg, bg))
}

/// Labels of the WCAG levels `ratio` satisfies.
#[wasm_bindgen]
pub fn accessibility_levels(ratio: f64) -> Vec<String> {
    contrast::accessibility_levels(ratio)
        .into_iter()
        .map(|level| level.label().to_string())
        .collect()
}

// ============================================================================
// Extraction
// ============================================================================

/// Dominant colors of canvas `ImageData` bytes, as JSON
/// `[{"color": "#RRGGBB", "count": n}, ...]`, largest cluster first.
#[wasm_bindgen]
pub fn extract_colors(pixels: &[u8], k: usize) -> Result<String, JsValue> {
    // Math.random yields 52 random bits
    let seed = (js_sys::Math::random() * (1u64 << 52) as f64) as u64;
    let rng = StdRng::seed_from_u64(seed);
    extract_json(pixels, k, rng).map_err(js_err)
}

fn extract_json(pixels: &[u8], k: usize, rng: StdRng) -> error::Result<String> {
    let mut extractor = DominantColorExtractor::with_config(ExtractorConfig::default().with_k(k), rng);
    let colors = extractor.extract(pixels)?;
    Ok(serde_json::to_string(&colors)?)
}

// ============================================================================
// Palettes and harmonies
// ============================================================================

/// Palette colors for a base hex color and scheme name.
#[wasm_bindgen]
pub fn generate_palette(base: &str, scheme: &str) -> Result<Vec<String>, JsValue> {
    let base = color::hex_to_rgb(base).map_err(js_err)?;
    let scheme: PaletteScheme = scheme.parse().map_err(js_err)?;
    Ok(palette::generate_palette(base, scheme).iter().map(|c| c.to_hex()).collect())
}

/// Export document for a palette, as pretty-printed JSON.
///
/// `created_millis` is `Date.now()` at export time.
#[wasm_bindgen]
pub fn export_palette(base: &str, scheme: &str, created_millis: f64) -> Result<String, JsValue> {
    build_export(base, scheme, created_millis)
        .and_then(|export| export.to_json())
        .map_err(js_err)
}

/// Download file name matching [`export_palette`].
#[wasm_bindgen]
pub fn export_file_name(base: &str, scheme: &str, created_millis: f64) -> Result<String, JsValue> {
    build_export(base, scheme, created_millis)
        .map(|export| export.file_name())
        .map_err(js_err)
}

fn build_export(base: &str, scheme: &str, created_millis: f64) -> error::Result<PaletteExport> {
    let base = color::hex_to_rgb(base)?;
    let scheme: PaletteScheme = scheme.parse()?;
    let created_at = OffsetDateTime::from_unix_timestamp_nanos(i128::from(created_millis as i64) * 1_000_000)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    Ok(Palette::generate_at(base, scheme, created_at).export())
}

/// Harmony colors for a hue and harmony name.
#[wasm_bindgen]
pub fn harmony_colors(hue: f64, harmony: &str) -> Result<Vec<String>, JsValue> {
    let harmony: Harmony = harmony.parse().map_err(js_err)?;
    Ok(harmony.colors(hue).iter().map(|c| c.to_hex()).collect())
}

/// Hue under a click, given its offset from the wheel center.
#[wasm_bindgen]
pub fn hue_at_point(dx: f64, dy: f64) -> f64 {
    harmony::hue_at_point(dx, dy)
}

/// Psychology record for a hue, as JSON
/// `{"name", "emotions", "usage", "cultural"}`.
#[wasm_bindgen]
pub fn color_psychology(hue: f64) -> String {
    let record = psychology::psychology_for_hue(hue);
    serde_json::to_string(record).unwrap_or_default()
}

/// `linear-gradient(...)` for two hex colors and a CSS direction.
#[wasm_bindgen]
pub fn gradient_css(start: &str, end: &str, direction: &str) -> Result<String, JsValue> {
    let start = color::hex_to_rgb(start).map_err(js_err)?;
    let end = color::hex_to_rgb(end).map_err(js_err)?;
    let direction: GradientDirection = direction.parse().map_err(js_err)?;
    Ok(Gradient::new(start, end, direction).css())
}

/// Get library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(hex_to_rgb("#2E8B57").unwrap(), vec![46, 139, 87]);
        assert_eq!(rgb_to_hex(46, 139, 87), "#2E8B57");
        assert_eq!(hex_to_hsl("2e8b57").unwrap(), vec![146.0, 50.0, 36.0]);
        assert_eq!(hex_to_hsv("2e8b57").unwrap(), vec![146.0, 67.0, 55.0]);
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0).unwrap(), "#FF0000");
        assert_eq!(hsv_to_hex(120.0, 100.0, 100.0).unwrap(), "#00FF00");
    }

    #[test]
    fn test_contrast() {
        let ratio = contrast_ratio("#000000", "#FFFFFF").unwrap();
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(accessibility_levels(ratio), vec!["AA Large", "AA Normal", "AAA Normal"]);
    }

    #[test]
    fn test_extract_json() {
        let pixels: Vec<u8> = [255, 0, 0, 255].repeat(100);
        let json = extract_json(&pixels, 2, StdRng::seed_from_u64(1)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["color"], "#FF0000");
        assert_eq!(value[0]["count"], 10);
    }

    #[test]
    fn test_palette_and_harmony() {
        assert_eq!(generate_palette("#2E8B57", "triadic").unwrap().len(), 9);
        assert_eq!(harmony_colors(0.0, "complementary").unwrap(), vec!["#FF0000", "#00FFFF"]);
        assert!((hue_at_point(0.0, 1.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_export() {
        let json = export_palette("#2E8B57", "analogous", 1_700_000_000_000.0).unwrap();
        assert!(json.contains("\"type\": \"analogous\""));
        assert_eq!(
            export_file_name("#2E8B57", "analogous", 1_700_000_000_000.0).unwrap(),
            "color-palette-analogous-1700000000000.json"
        );
    }

    #[test]
    fn test_psychology_and_gradient() {
        let value: serde_json::Value = serde_json::from_str(&color_psychology(146.0)).unwrap();
        assert_eq!(value["name"], "Green");
        assert_eq!(
            gradient_css("#000000", "#ffffff", "to right").unwrap(),
            "linear-gradient(to right, #000000, #FFFFFF)"
        );
    }

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
