//! # chromakit
//!
//! 8-bit sRGB color toolkit: color-space conversions, WCAG contrast,
//! dominant color extraction, rule-based palettes and wheel harmonies.
//!
//! The core is pure and synchronous. Randomized steps (k-means
//! initialization, random palettes) take an explicit [`rand::Rng`] so runs
//! can be reproduced with a seed.
//!
//! ## Quick Start
//!
//! ```rust
//! use chromakit::prelude::*;
//!
//! let base: Rgb = "#2E8B57".parse()?;
//! assert_eq!(base.to_hsl(), Hsl::new(146.0, 50.0, 36.0));
//!
//! let palette = generate_palette(base, PaletteScheme::Monochromatic);
//! assert_eq!(palette[2].to_hex(), "#40BF77");
//!
//! let report = ContrastReport::new(Rgb::BLACK, Rgb::WHITE);
//! assert_eq!(report.ratio_label(), "21.00:1");
//! # Ok::<(), chromakit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `wasm`: WebAssembly bindings for browser front ends
//! - `cli`: the `chromakit` command-line binary
//!
//! ## References
//!
//! - Smith, A. R. (1978). "Color Gamut Transform Pairs." *SIGGRAPH '78*.
//! - W3C (2008). *Web Content Accessibility Guidelines (WCAG) 2.0*.
//! - Lloyd, S. P. (1982). "Least Squares Quantization in PCM." *IEEE Trans.
//!   Information Theory*, 28(2), 129-137.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in color code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color space conversions.
pub mod color;

/// WCAG relative luminance and contrast ratio.
pub mod contrast;

/// Packed RGBA pixel buffers and PNG I/O.
pub mod image;

/// Dominant color extraction (k-means).
pub mod extract;

// ============================================================================
// Color Rules
// ============================================================================

/// Palette schemes, random palettes and JSON export.
pub mod palette;

/// Color-wheel harmonies.
pub mod harmony;

/// Color psychology by hue band.
pub mod psychology;

// ============================================================================
// Tools
// ============================================================================

/// Picker state.
pub mod picker;

/// Linear gradients.
pub mod gradient;

/// Saved color persistence.
pub mod store;

/// Front-end configuration.
pub mod config;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for chromakit operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use chromakit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{hex_to_rgb, hsl_to_hex, hsv_to_hex, rgb_to_hex, rgb_to_hsl, rgb_to_hsv, Hsl, Hsv, Rgb, Rgba};
    pub use crate::contrast::{accessibility_levels, contrast_ratio, relative_luminance, ContrastReport, WcagLevel};
    pub use crate::error::{Error, Result};
    pub use crate::extract::{extract_colors, DominantColor, DominantColorExtractor, ExtractorConfig};
    pub use crate::gradient::{Gradient, GradientDirection};
    pub use crate::harmony::{hue_at_point, Harmony};
    pub use crate::image::PixelBuffer;
    pub use crate::palette::{generate_palette, random_palette, Palette, PaletteExport, PaletteScheme};
    pub use crate::picker::PickerState;
    pub use crate::psychology::{psychology_for_hue, ColorPsychology, HueBand};
    pub use crate::store::{AddOutcome, FileBackend, KeyValueBackend, MemoryBackend, SavedColors, SavedPaletteStore};
}

// ============================================================================
// Tests
// ============================================================================
