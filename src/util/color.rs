//! sRGB colors parsed from CSS-style hex strings.
//!
//! Colors are stored as sRGB components in [0, 1] and serialize back to
//! `#rrggbb`, which is what the debug panel's color picker emits. GPU
//! uniforms want linear values, see [`Color::to_linear`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red, in [0, 1].
    pub r: f32,
    /// Green, in [0, 1].
    pub g: f32,
    /// Blue, in [0, 1].
    pub b: f32,
}

/// Reasons a hex color string fails to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    MissingHash,
    /// Only `#rgb` and `#rrggbb` are accepted.
    BadLength(usize),
    /// A character outside `[0-9a-fA-F]`.
    BadDigit(char),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::BadLength(n) => {
                write!(f, "expected 3 or 6 hex digits, got {n}")
            }
            Self::BadDigit(c) => write!(f, "invalid hex digit {c:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl Color {
    /// White.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Color from sRGB components in [0, 1].
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from 8-bit sRGB components.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse `#rrggbb` or the short `#rgb` form.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] for anything else.
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or(ColorParseError::MissingHash)?;
        let mut nibbles = Vec::with_capacity(6);
        for c in digits.chars() {
            let v = c.to_digit(16).ok_or(ColorParseError::BadDigit(c))?;
            nibbles.push(v as u8);
        }
        match nibbles.as_slice() {
            [r, g, b] => Ok(Self::from_rgb8(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::from_rgb8(
                (r1 << 4) | r0,
                (g1 << 4) | g0,
                (b1 << 4) | b0,
            )),
            other => Err(ColorParseError::BadLength(other.len())),
        }
    }

    /// 8-bit sRGB components, rounded.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Linear-light components for GPU uniforms.
    #[must_use]
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

    /// Shader components for a render target. An sRGB target encodes on
    /// store, so it gets linear values; a plain unorm target gets the sRGB
    /// components as they are.
    #[must_use]
    pub fn for_target(self, srgb_target: bool) -> [f32; 3] {
        if srgb_target {
            self.to_linear()
        } else {
            [self.r, self.g, self.b]
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_form() {
        let c = Color::parse_hex("#fc6d6d").unwrap();
        assert_eq!(c.to_rgb8(), [0xfc, 0x6d, 0x6d]);
        assert_eq!(c.to_hex(), "#fc6d6d");
    }

    #[test]
    fn parses_short_form_and_uppercase() {
        let c: Color = "#F0a".parse().unwrap();
        assert_eq!(c.to_rgb8(), [0xff, 0x00, 0xaa]);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            Color::parse_hex("fc6d6d"),
            Err(ColorParseError::MissingHash)
        );
        assert_eq!(
            Color::parse_hex("#fc6d"),
            Err(ColorParseError::BadLength(4))
        );
        assert_eq!(
            Color::parse_hex("#zz6d6d"),
            Err(ColorParseError::BadDigit('z'))
        );
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(Color::rgb(0.0, 1.0, 0.0).to_linear(), [0.0, 1.0, 0.0]);
        let mid = Color::rgb(0.5, 0.5, 0.5).to_linear()[0];
        assert!((mid - 0.214).abs() < 1e-3, "got {mid}");
    }

    #[test]
    fn target_encoding_picks_component_space() {
        let c = Color::rgb(0.5, 1.0, 0.0);
        assert_eq!(c.for_target(false), [0.5, 1.0, 0.0]);
        assert_eq!(c.for_target(true), c.to_linear());
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::from_rgb8(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102ff\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_rgb8(), [1, 2, 255]);
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
