//! Drawing colors
//!
//! A PixelDraw color is kept exactly as written in the source: either a
//! `#RRGGBB` literal or a bare alphabetic name. Names are not checked
//! against any palette at compile time. Conversion to RGBA only happens when
//! a backend renders the drawing:
//! - Hex: `#RGB`, `#RRGGBB`, `#RRGGBBAA` (fast path)
//! - Everything else (CSS named colors, `rgb()`, ...) via lightningcss

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Hex literal with the wrong number of digits
    #[error("invalid color length {0}, expected 3, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// Color name containing something other than ASCII letters
    #[error("invalid color name '{0}'")]
    InvalidName(String),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// The current drawing color of a program.
///
/// Displays and serializes as the verbatim source text.
///
/// ```
/// use pixeldraw::color::Color;
///
/// let red: Color = "#FF0000".parse().unwrap();
/// assert!(matches!(red, Color::Hex(_)));
/// assert_eq!(red.to_string(), "#FF0000");
///
/// let teal: Color = "Teal".parse().unwrap();
/// assert_eq!(teal, Color::Named("Teal".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// `#RRGGBB`, case preserved
    Hex(String),
    /// Alphabetic identifier such as `red`
    Named(String),
}

impl Color {
    /// Black, the drawing color before any `color` statement.
    pub fn black() -> Self {
        Color::Hex("#000000".to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Color::Hex(s) | Color::Named(s) => s,
        }
    }

    /// Resolve to RGBA for rendering.
    ///
    /// # Errors
    ///
    /// Returns `ColorError::CssParse` for names that are not CSS colors.
    pub fn to_rgba(&self) -> Result<Rgba<u8>, ColorError> {
        parse_color(self.as_str())
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
                return Err(ColorError::InvalidHex(c));
            }
            if hex.len() != 6 {
                return Err(ColorError::InvalidLength(hex.len()));
            }
            return Ok(Color::Hex(s.to_string()));
        }

        if s.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Color::Named(s.to_string()))
        } else {
            Err(ColorError::InvalidName(s.to_string()))
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        match color {
            Color::Hex(s) | Color::Named(s) => s,
        }
    }
}

/// Parse a CSS color string into an RGBA color.
///
/// ```
/// use pixeldraw::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("#00FF0080").unwrap(), image::Rgba([0, 255, 0, 128]));
/// assert_eq!(parse_color("blue").unwrap(), image::Rgba([0, 0, 255, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex_color(hex),
        None => parse_css_color(s),
    }
}

/// Parse the digits of a hex color (without the leading '#').
fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // All characters are ASCII hex digits from here on, so byte slicing is safe.
    let channel = |range: std::ops::Range<usize>| -> Result<u8, ColorError> {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidLength(hex.len()))
    };

    match hex.len() {
        3 => {
            // #RGB -> each digit doubled
            let r = channel(0..1)? * 17;
            let g = channel(1..2)? * 17;
            let b = channel(2..3)? * 17;
            Ok(Rgba([r, g, b, 255]))
        }
        6 => Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255])),
        8 => Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a CSS color using lightningcss (named colors, rgb(), hsl(), ...)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok(Rgba([
                (rgb.r * 255.0).round() as u8,
                (rgb.g * 255.0).round() as u8,
                (rgb.b * 255.0).round() as u8,
                (rgb.alpha * 255.0).round() as u8,
            ])),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_literal() {
        let color: Color = "#ff00Aa".parse().unwrap();
        assert_eq!(color, Color::Hex("#ff00Aa".to_string()));
        assert_eq!(color.to_string(), "#ff00Aa");
    }

    #[test]
    fn test_color_from_any_alphabetic_name() {
        // No palette check: unknown names are accepted verbatim
        let color: Color = "Blurple".parse().unwrap();
        assert_eq!(color, Color::Named("Blurple".to_string()));
    }

    #[test]
    fn test_color_rejects_short_hex() {
        assert_eq!("#FFF".parse::<Color>(), Err(ColorError::InvalidLength(3)));
    }

    #[test]
    fn test_color_rejects_bad_hex_digit() {
        assert_eq!("#GG0000".parse::<Color>(), Err(ColorError::InvalidHex('G')));
    }

    #[test]
    fn test_color_rejects_non_alpha_name() {
        assert!(matches!("dark-red".parse::<Color>(), Err(ColorError::InvalidName(_))));
        assert_eq!("".parse::<Color>(), Err(ColorError::Empty));
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(Color::default().as_str(), "#000000");
    }

    #[test]
    fn test_color_serde_as_plain_string() {
        let json = serde_json::to_string(&Color::Named("red".to_string())).unwrap();
        assert_eq!(json, "\"red\"");
        let parsed: Color = serde_json::from_str("\"#00FF00\"").unwrap();
        assert_eq!(parsed, Color::Hex("#00FF00".to_string()));
        assert!(serde_json::from_str::<Color>("\"#00FF\"").is_err());
    }

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(parse_color("#FF0000").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("#abc").unwrap(), Rgba([170, 187, 204, 255]));
        assert_eq!(parse_color("#00000000").unwrap(), Rgba([0, 0, 0, 0]));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
    }

    #[test]
    fn test_named_to_rgba() {
        assert_eq!(Color::Named("red".to_string()).to_rgba().unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("white").unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_unknown_name_to_rgba_fails() {
        let result = Color::Named("notacolor".to_string()).to_rgba();
        assert!(matches!(result, Err(ColorError::CssParse(_))));
    }
}
