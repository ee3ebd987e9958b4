//! Color picker state.
//!
//! [`PickerState`] is an immutable value: every input event produces a new
//! state. The cursor is kept in HSV terms, where the square's vertical axis
//! is "darkness" (`100 - value`) and the slider is hue.

use serde::{Deserialize, Serialize};

use crate::color::{Hsl, Hsv, Rgb};

/// Color shown when the picker first opens.
pub const DEFAULT_COLOR: Rgb = Rgb::new(0x2E, 0x8B, 0x57);

/// Current picker color and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerState {
    color: Rgb,
    hue: f64,
    saturation: f64,
    darkness: f64,
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl PickerState {
    /// State showing `color`, with the cursor derived from its HSV view.
    #[must_use]
    pub fn new(color: Rgb) -> Self {
        let hsv = color.to_hsv();
        Self {
            color,
            hue: hsv.h,
            saturation: hsv.s,
            darkness: 100.0 - hsv.v,
        }
    }

    /// Jump to `color`.
    #[must_use]
    pub fn with_color(self, color: Rgb) -> Self {
        Self::new(color)
    }

    /// Apply text typed into the hex field.
    ///
    /// Non-hex characters are dropped and input is cut at six digits. The
    /// state only changes once six digits are present.
    #[must_use]
    pub fn with_hex_input(self, input: &str) -> Self {
        let digits: String = input.chars().filter(char::is_ascii_hexdigit).take(6).collect();
        match Rgb::from_hex(&digits) {
            Ok(color) => Self::new(color),
            Err(_) => self,
        }
    }

    /// Apply the three RGB fields. Any channel outside 0-255 leaves the
    /// state unchanged.
    #[must_use]
    pub fn with_rgb_input(self, r: i64, g: i64, b: i64) -> Self {
        Rgb::checked(r, g, b).map_or(self, Self::new)
    }

    /// Move the cursor in the saturation/darkness square.
    ///
    /// `x` and `y` are fractions of the square's width and height and are
    /// clamped to `[0, 1]`. Hue is kept even when the result is gray.
    #[must_use]
    pub fn with_sv_position(self, x: f64, y: f64) -> Self {
        let saturation = clamp_unit(x) * 100.0;
        let darkness = clamp_unit(y) * 100.0;
        Self {
            color: Hsv::new(self.hue, saturation, 100.0 - darkness).to_rgb(),
            hue: self.hue,
            saturation,
            darkness,
        }
    }

    /// Move the hue slider; `x` is a fraction of its width.
    #[must_use]
    pub fn with_hue_position(self, x: f64) -> Self {
        let hue = clamp_unit(x) * 360.0;
        Self {
            color: Hsv::new(hue, self.saturation, 100.0 - self.darkness).to_rgb(),
            hue,
            ..self
        }
    }

    /// Current color.
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.color
    }

    /// Current color as `#RRGGBB`.
    #[must_use]
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    /// Rounded HSL view of the current color.
    #[must_use]
    pub fn hsl(&self) -> Hsl {
        self.color.to_hsl()
    }

    /// Rounded HSV view of the current color.
    #[must_use]
    pub fn hsv(&self) -> Hsv {
        self.color.to_hsv()
    }

    /// `rgb(r, g, b)`.
    #[must_use]
    pub fn rgb_css(&self) -> String {
        self.color.css()
    }

    /// `hsl(h, s%, l%)`.
    #[must_use]
    pub fn hsl_css(&self) -> String {
        self.hsl().css()
    }

    /// Cursor hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Cursor saturation in percent.
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Cursor darkness (`100 - value`) in percent.
    #[must_use]
    pub const fn darkness(&self) -> f64 {
        self.darkness
    }

    /// Cursor position in the square as fractions `(x, y)`.
    #[must_use]
    pub fn sv_position(&self) -> (f64, f64) {
        (self.saturation / 100.0, self.darkness / 100.0)
    }

    /// Slider position as a fraction.
    #[must_use]
    pub fn hue_position(&self) -> f64 {
        self.hue / 360.0
    }

    /// CSS background for the square at the current hue.
    #[must_use]
    pub fn hue_background_css(&self) -> String {
        format!(
            "linear-gradient(to bottom, transparent 0%, #000 100%), \
             linear-gradient(to right, #fff 0%, hsl({}, 100%, 50%) 100%)",
            self.hue
        )
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
