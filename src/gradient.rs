//! Two-color linear gradients: CSS output and raster previews.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::error::{Error, Result};
use crate::image::PixelBuffer;

/// Direction of a linear gradient, as CSS understands it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GradientDirection {
    /// `to right`.
    #[default]
    ToRight,
    /// `to left`.
    ToLeft,
    /// `to bottom`.
    ToBottom,
    /// `to top`.
    ToTop,
    /// `to bottom right`.
    ToBottomRight,
    /// `to bottom left`.
    ToBottomLeft,
    /// `to top right`.
    ToTopRight,
    /// `to top left`.
    ToTopLeft,
    /// `<n>deg`: 0 points up, angles grow clockwise.
    Angle(f64),
}

impl GradientDirection {
    const KEYWORDS: [(Self, &'static str); 8] = [
        (Self::ToRight, "to right"),
        (Self::ToLeft, "to left"),
        (Self::ToBottom, "to bottom"),
        (Self::ToTop, "to top"),
        (Self::ToBottomRight, "to bottom right"),
        (Self::ToBottomLeft, "to bottom left"),
        (Self::ToTopRight, "to top right"),
        (Self::ToTopLeft, "to top left"),
    ];

    /// CSS angle in degrees.
    ///
    /// Corner keywords map to the diagonal of a square box.
    #[must_use]
    pub fn degrees(self) -> f64 {
        match self {
            Self::ToTop => 0.0,
            Self::ToTopRight => 45.0,
            Self::ToRight => 90.0,
            Self::ToBottomRight => 135.0,
            Self::ToBottom => 180.0,
            Self::ToBottomLeft => 225.0,
            Self::ToLeft => 270.0,
            Self::ToTopLeft => 315.0,
            Self::Angle(deg) => deg,
        }
    }
}

impl fmt::Display for GradientDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Angle(deg) = self {
            return write!(f, "{deg}deg");
        }
        let keyword = Self::KEYWORDS
            .iter()
            .find(|(direction, _)| direction == self)
            .map_or("to right", |(_, keyword)| *keyword);
        f.write_str(keyword)
    }
}

impl FromStr for GradientDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_lowercase();
        if let Some((direction, _)) = Self::KEYWORDS.iter().find(|(_, keyword)| *keyword == normalized) {
            return Ok(*direction);
        }

        normalized
            .strip_suffix("deg")
            .and_then(|n| n.trim().parse::<f64>().ok())
            .filter(|deg| deg.is_finite())
            .map(Self::Angle)
            .ok_or_else(|| Error::UnknownDirection(s.to_string()))
    }
}

/// Linear gradient between two colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Color at the start of the gradient line.
    pub start: Rgb,
    /// Color at the end of the gradient line.
    pub end: Rgb,
    /// Gradient line direction.
    pub direction: GradientDirection,
}

impl Gradient {
    /// Create a gradient.
    #[must_use]
    pub const fn new(start: Rgb, end: Rgb, direction: GradientDirection) -> Self {
        Self {
            start,
            end,
            direction,
        }
    }

    /// `linear-gradient(<direction>, #AAAAAA, #BBBBBB)`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("linear-gradient({}, {}, {})", self.direction, self.start, self.end)
    }

    /// `background: linear-gradient(...);`.
    #[must_use]
    pub fn declaration(&self) -> String {
        format!("background: {};", self.css())
    }

    /// Color at position `t` along the gradient line.
    #[must_use]
    pub fn color_at(&self, t: f32) -> Rgb {
        Rgba::from(self.start).lerp(Rgba::from(self.end), t).to_rgb()
    }

    /// `n` evenly spaced colors from start to end inclusive.
    #[must_use]
    pub fn stops(&self, n: usize) -> Vec<Rgb> {
        match n {
            0 => Vec::new(),
            1 => vec![self.start],
            _ => (0..n).map(|i| self.color_at(i as f32 / (n - 1) as f32)).collect(),
        }
    }

    /// Rasterize the gradient into a `width` x `height` preview.
    ///
    /// Uses the CSS gradient-line length, so the start and end colors land
    /// exactly on the corners or edges the direction points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero.
    pub fn render(&self, width: u32, height: u32) -> Result<PixelBuffer> {
        let mut buffer = PixelBuffer::filled(width, height, Rgba::from(self.start))?;

        let angle = self.direction.degrees().to_radians();
        let (vx, vy) = (angle.sin(), -angle.cos());
        let (half_w, half_h) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let half_len = half_w * vx.abs() + half_h * vy.abs();

        for y in 0..height {
            for x in 0..width {
                let dx = f64::from(x) + 0.5 - half_w;
                let dy = f64::from(y) + 0.5 - half_h;
                let t = if half_len > 0.0 {
                    (dx * vx + dy * vy + half_len) / (2.0 * half_len)
                } else {
                    0.0
                };
                buffer.set_pixel(x, y, Rgba::from(self.color_at(t as f32)));
            }
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_output() {
        let g = Gradient::new(Rgb::new(0x66, 0x7E, 0xEA), Rgb::new(0x76, 0x4B, 0xA2), GradientDirection::ToRight);
        assert_eq!(g.css(), "linear-gradient(to right, #667EEA, #764BA2)");
        assert_eq!(g.declaration(), "background: linear-gradient(to right, #667EEA, #764BA2);");

        let angled = Gradient::new(Rgb::BLACK, Rgb::WHITE, GradientDirection::Angle(135.0));
        assert_eq!(angled.css(), "linear-gradient(135deg, #000000, #FFFFFF)");
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("to bottom right".parse::<GradientDirection>().unwrap(), GradientDirection::ToBottomRight);
        assert_eq!("  To   Top ".parse::<GradientDirection>().unwrap(), GradientDirection::ToTop);
        assert_eq!("45deg".parse::<GradientDirection>().unwrap(), GradientDirection::Angle(45.0));
        assert_eq!("-90.5deg".parse::<GradientDirection>().unwrap(), GradientDirection::Angle(-90.5));
        assert!(matches!("sideways".parse::<GradientDirection>(), Err(Error::UnknownDirection(_))));
        assert!(matches!("deg".parse::<GradientDirection>(), Err(Error::UnknownDirection(_))));
    }

    #[test]
    fn test_direction_display_round_trip() {
        for (direction, keyword) in GradientDirection::KEYWORDS {
            assert_eq!(direction.to_string(), keyword);
            assert_eq!(keyword.parse::<GradientDirection>().unwrap(), direction);
        }
    }

    #[test]
    fn test_stops() {
        let g = Gradient::new(Rgb::BLACK, Rgb::WHITE, GradientDirection::default());
        assert!(g.stops(0).is_empty());
        assert_eq!(g.stops(1), vec![Rgb::BLACK]);
        assert_eq!(g.stops(3), vec![Rgb::BLACK, Rgb::new(128, 128, 128), Rgb::WHITE]);
    }

    #[test]
    fn test_render_horizontal() {
        let g = Gradient::new(Rgb::BLACK, Rgb::WHITE, GradientDirection::ToRight);
        let buf = g.render(100, 4).unwrap();
        let left = buf.pixel(0, 2).unwrap();
        let right = buf.pixel(99, 2).unwrap();
        assert!(left.r < 5);
        assert!(right.r > 250);
        // Constant along the perpendicular axis
        assert_eq!(buf.pixel(50, 0), buf.pixel(50, 3));
    }

    #[test]
    fn test_render_vertical_and_reverse() {
        let down = Gradient::new(Rgb::RED, Rgb::BLUE, GradientDirection::ToBottom).render(3, 50).unwrap();
        assert!(down.pixel(1, 0).unwrap().r > 240);
        assert!(down.pixel(1, 49).unwrap().b > 240);

        let up = Gradient::new(Rgb::RED, Rgb::BLUE, GradientDirection::ToTop).render(3, 50).unwrap();
        assert!(up.pixel(1, 49).unwrap().r > 240);
    }

    #[test]
    fn test_render_diagonal_corners() {
        let g = Gradient::new(Rgb::BLACK, Rgb::WHITE, GradientDirection::ToBottomRight);
        let buf = g.render(64, 64).unwrap();
        assert!(buf.pixel(0, 0).unwrap().r < 8);
        assert!(buf.pixel(63, 63).unwrap().r > 247);
        let mid = buf.pixel(63, 0).unwrap().r;
        assert!((120..=135).contains(&mid));
    }

    #[test]
    fn test_render_zero_size() {
        let g = Gradient::new(Rgb::BLACK, Rgb::WHITE, GradientDirection::ToRight);
        assert!(matches!(g.render(0, 10), Err(Error::InvalidDimensions { .. })));
    }
}
