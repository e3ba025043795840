//! RGB colours for diagram markers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid colour string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {input:?}: expected #rrggbb")]
pub struct InvalidColor {
    input: String,
}

/// An opaque 24-bit RGB colour.
///
/// Serialized as a `#rrggbb` hex string.
///
/// # Examples
///
/// ```
/// use train_diagram::domain::Color;
///
/// let blue: Color = "#0000ff".parse().unwrap();
/// assert_eq!(blue, Color::BLUE);
/// assert_eq!(blue.to_string(), "#0000ff");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(0xff, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 0x80, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 0xff);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidColor {
            input: s.to_string(),
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({self})")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex() {
        assert_eq!("#008000".parse::<Color>().unwrap(), Color::GREEN);
        assert_eq!("#FF0000".parse::<Color>().unwrap(), Color::RED);
    }

    #[test]
    fn rejects_invalid() {
        for s in ["", "ff0000", "#ff00", "#ff00000", "#gg0000", "red"] {
            assert!(s.parse::<Color>().is_err(), "{s:?} should be rejected");
        }
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::BLUE).unwrap();
        assert_eq!(json, "\"#0000ff\"");

        let color: Color = serde_json::from_str("\"#123abc\"").unwrap();
        assert_eq!(color, Color::rgb(0x12, 0x3a, 0xbc));

        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
