//! Visual styles of annotation graphics.

use serde::{Deserialize, Serialize};

/// Color representation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::try_from_hex(&value).unwrap_or(Color::rgba(0, 0, 0, 255))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl Color {
    /// Transparent color: `#00000000`
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 && hex_string.len() != 9 || hex_string.chars().next()? != '#' {
            return None;
        }

        let r = u8::from_str_radix(&hex_string[1..3], 16).ok()?;
        let g = u8::from_str_radix(&hex_string[3..5], 16).ok()?;
        let b = u8::from_str_radix(&hex_string[5..7], 16).ok()?;
        let a = if hex_string.len() == 9 {
            u8::from_str_radix(&hex_string[7..9], 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    ///
    /// # Panics
    ///
    /// Panics if the parsing fails.
    pub const fn from_hex(hex_string: &'static str) -> Self {
        let bytes = hex_string.as_bytes();
        if bytes.len() != 7 && bytes.len() != 9 || bytes[0] != b'#' {
            panic!("Invalid color hex string");
        }

        let r = decode_byte(&[bytes[1], bytes[2]]);
        let g = decode_byte(&[bytes[3], bytes[4]]);
        let b = decode_byte(&[bytes[5], bytes[6]]);
        let a = if bytes.len() == 9 {
            decode_byte(&[bytes[7], bytes[8]])
        } else {
            255
        };

        Self { r, g, b, a }
    }

    /// Returns a new color instance, copied from the base one but with the given alpha channel.
    pub fn with_alpha(&self, a: u8) -> Self {
        Self { a, ..*self }
    }

    /// Returns true if the color is fully transparent (`a == 0`).
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Red component of the color in RGBA space.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green component of the color in RGBA space.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue component of the color in RGBA space.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Opacity component of the color.
    pub fn a(&self) -> u8 {
        self.a
    }
}

const fn decode_byte(hex: &[u8; 2]) -> u8 {
    decode_hex_char(hex[0]) * 16 + decode_hex_char(hex[1])
}

const fn decode_hex_char(char: u8) -> u8 {
    match char {
        b'0'..=b'9' => char - b'0',
        b'a'..=b'f' => char - b'a' + 10,
        b'A'..=b'F' => char - b'A' + 10,
        _ => panic!("Invalid symbol in hex string"),
    }
}

/// Style of a circular point marker.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPaint {
    /// Radius of the marker circle in pixels.
    pub radius: f64,
    /// Color of the circle outline.
    pub color: Color,
    /// Color the circle is filled with.
    pub fill_color: Color,
    /// Width of the circle outline in pixels.
    pub width: f64,
}

/// Style of a polyline.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePaint {
    /// Color of the line. Use the alpha channel for semi-transparent lines.
    pub color: Color,
    /// Width of the line in pixels.
    pub width: f64,
}

/// Style of a polygon.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPaint {
    /// Color of the polygon outline.
    pub color: Color,
    /// Color the polygon interior is filled with.
    pub fill_color: Color,
    /// Width of the outline in pixels.
    pub width: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex6_round_trip() {
        let color = Color::try_from_hex("#8A2035").expect("valid hex string");
        assert_eq!(color, Color::rgba(0x8A, 0x20, 0x35, 255));
        assert_eq!(color.to_hex(), "#8A2035FF");
    }

    #[test]
    fn hex8_sets_alpha() {
        let color = Color::try_from_hex("#B99056B3").expect("valid hex string");
        assert_eq!(color.a(), 0xB3);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(Color::try_from_hex("8A2035").is_none());
        assert!(Color::try_from_hex("#8A20").is_none());
        assert!(Color::try_from_hex("#8A20ZZ").is_none());
    }

    #[test]
    fn const_from_hex_matches_runtime_parsing() {
        const STROKE: Color = Color::from_hex("#8a2035");
        assert_eq!(Some(STROKE), Color::try_from_hex("#8A2035"));
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let color = Color::rgba(10, 20, 30, 255).with_alpha(0);
        assert_eq!(color, Color::rgba(10, 20, 30, 0));
        assert!(color.is_transparent());
    }
}
