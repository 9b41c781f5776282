//! sRGB color type
//!
//! Theme palettes store colors as `#RRGGBB` hex strings on disk. In memory they
//! are parsed once into [`Color`], so every downstream computation (luminance,
//! blending, tinting) works on well-formed channels.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a hex color string
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits, got {len} in {input:?}")]
    Length { input: String, len: usize },

    #[error("invalid hex digit in {0:?}")]
    Digit(String),
}

/// 8-bit sRGB color with straight alpha
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const TRANSPARENT: Color = Color::rgba(0x00, 0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse `#RRGGBB`, `RRGGBB`, `#RRGGBBAA` or `RRGGBBAA`
    pub fn from_hex_str(input: &str) -> Result<Self, ColorParseError> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::Length {
                input: input.to_string(),
                len: digits.len(),
            });
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(input.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::Digit(input.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        self
    }

    pub fn alpha(&self) -> f32 {
        f32::from(self.a) / 255.0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }

    /// Channels normalized to `[0, 1]`
    pub fn to_unit_rgb(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Hex representation, `#RRGGBB` for opaque colors and `#RRGGBBAA` otherwise
    pub fn to_hex_string(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to HSL. Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_unit_rgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta.abs() < f64::EPSILON {
            return (0.0, 0.0, l);
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let h = if (max - r).abs() < f64::EPSILON {
            ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Build an opaque color from HSL components
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

        let (r1, g1, b1) = match h_prime as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r1), to_u8(g1), to_u8(b1))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex_str(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Color::from_hex_str("#1E66F5"), Ok(Color::from_hex(0x1E66F5)));
        assert_eq!(Color::from_hex_str("1e66f5"), Ok(Color::from_hex(0x1E66F5)));
    }

    #[test]
    fn parses_alpha_suffix() {
        let c = Color::from_hex_str("#00000080").unwrap();
        assert_eq!(c.a, 0x80);
        assert!(!c.is_opaque());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            Color::from_hex_str("#FFF"),
            Err(ColorParseError::Length { len: 3, .. })
        ));
        assert!(matches!(
            Color::from_hex_str("#GG0000"),
            Err(ColorParseError::Digit(_))
        ));
        assert!(Color::from_hex_str("").is_err());
    }

    #[test]
    fn hex_string_round_trips_case_insensitively() {
        let c = Color::from_hex_str("#a8c7fa").unwrap();
        assert_eq!(c.to_hex_string(), "#A8C7FA");
        assert_eq!(Color::TRANSPARENT.to_hex_string(), "#00000000");
    }

    #[test]
    fn hsl_primaries() {
        let (h, s, l) = Color::rgb(255, 0, 0).to_hsl();
        assert!((h - 0.0).abs() < 1e-9);
        assert!((s - 1.0).abs() < 1e-9);
        assert!((l - 0.5).abs() < 1e-9);

        let (h, _, _) = Color::rgb(0, 0, 255).to_hsl();
        assert!((h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn hsl_conversion_is_stable_for_palette_colors() {
        for hex in [0x3A5A8C, 0xF2B8B5, 0x1C1B1F, 0xFAFAF7, 0x7D5260] {
            let c = Color::from_hex(hex);
            let (h, s, l) = c.to_hsl();
            let back = Color::from_hsl(h, s, l);
            assert!((i16::from(back.r) - i16::from(c.r)).abs() <= 1, "{c}");
            assert!((i16::from(back.g) - i16::from(c.g)).abs() <= 1, "{c}");
            assert!((i16::from(back.b) - i16::from(c.b)).abs() <= 1, "{c}");
        }
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::from_hex(0x121212)).unwrap();
        assert_eq!(json, "\"#121212\"");
        let back: Color = serde_json::from_str("\"#121212\"").unwrap();
        assert_eq!(back, Color::from_hex(0x121212));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
