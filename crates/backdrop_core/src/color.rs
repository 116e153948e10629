//! Color type
//!
//! Colors deserialize from either a `"#rrggbb"` string or an `[r, g, b]` /
//! `[r, g, b, a]` float array, and always serialize as `[r, g, b, a]`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    // Site palette
    pub const NEON_CYAN: Color = Color::rgb(0.0, 245.0 / 255.0, 1.0);
    pub const NEON_MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const NEON_GREEN: Color = Color::rgb(0.0, 1.0, 136.0 / 255.0);
    pub const NEON_YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.trim().trim_start_matches('#');
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
            3 => {
                let short = u32::from_str_radix(digits, 16).ok()?;
                let r = (short >> 8) & 0xF;
                let g = (short >> 4) & 0xF;
                let b = short & 0xF;
                Some(Self::from_hex((r * 17) << 16 | (g * 17) << 8 | (b * 17)))
            }
            _ => None,
        }
    }

    /// Build a color from hue, saturation and lightness, all in `0..=1`
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s <= 0.0 {
            return Self::rgb(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self::rgb(
            hue_channel(q, p, h + 1.0 / 3.0),
            hue_channel(q, p, h),
            hue_channel(q, p, h - 1.0 / 3.0),
        )
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// Multiply the RGB channels, leaving alpha untouched
    pub fn scale_rgb(&self, factor: f32) -> Color {
        Color::rgba(self.r * factor, self.g * factor, self.b * factor, self.a)
    }
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Accepted on-disk spellings of a color
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb([f32; 3]),
    Rgba([f32; 4]),
}

/// Error for color strings that are not `#rgb`/`#rrggbb`
#[derive(Error, Debug)]
#[error("invalid color `{0}`, expected #rrggbb")]
pub struct InvalidColor(String);

impl TryFrom<ColorRepr> for Color {
    type Error = InvalidColor;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Color::parse_hex(&s).ok_or(InvalidColor(s)),
            ColorRepr::Rgb([r, g, b]) => Ok(Color::rgb(r, g, b)),
            ColorRepr::Rgba([r, g, b, a]) => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#00f5ff"), Some(Color::NEON_CYAN));
        assert_eq!(Color::parse_hex("ff00ff"), Some(Color::NEON_MAGENTA));
        assert_eq!(Color::parse_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse_hex("#12345"), None);
        assert_eq!(Color::parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_hsl_grayscale_and_primaries() {
        let gray = Color::from_hsl(0.3, 0.0, 0.9);
        assert!((gray.r - 0.9).abs() < 1e-6 && (gray.g - 0.9).abs() < 1e-6);

        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!((red.r - 1.0).abs() < 1e-5);
        assert!(red.g.abs() < 1e-5 && red.b.abs() < 1e-5);
    }

    #[test]
    fn test_deserialize_spellings() {
        let hex: Color = serde_json::from_str("\"#00ff88\"").unwrap();
        assert_eq!(hex, Color::NEON_GREEN);

        let arr: Color = serde_json::from_str("[1.0, 1.0, 0.0]").unwrap();
        assert_eq!(arr, Color::NEON_YELLOW);

        assert!(serde_json::from_str::<Color>("\"cyan\"").is_err());
    }
}
