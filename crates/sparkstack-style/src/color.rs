#![forbid(unsafe_code)]

//! Named color tokens.
//!
//! [`Color`] is what callers put on a sparkline (title color, line color).
//! It lowers to a [`PackedRgba`] when a cell is written; `Clear` lowers to
//! transparent so whatever is underneath shows through.

use std::fmt;
use std::str::FromStr;

use sparkstack_render::cell::PackedRgba;

/// A color token: one of the eight base ANSI colors, a true-color value, or
/// `Clear` (the terminal default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Clear,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// True-color RGB value.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Lower to a packed RGBA value using the xterm default palette.
    #[must_use]
    pub const fn to_packed(self) -> PackedRgba {
        match self {
            Self::Clear => PackedRgba::TRANSPARENT,
            Self::Black => PackedRgba::rgb(0, 0, 0),
            Self::Red => PackedRgba::rgb(205, 0, 0),
            Self::Green => PackedRgba::rgb(0, 205, 0),
            Self::Yellow => PackedRgba::rgb(205, 205, 0),
            Self::Blue => PackedRgba::rgb(0, 0, 238),
            Self::Magenta => PackedRgba::rgb(205, 0, 205),
            Self::Cyan => PackedRgba::rgb(0, 205, 205),
            Self::White => PackedRgba::rgb(229, 229, 229),
            Self::Rgb(r, g, b) => PackedRgba::rgb(r, g, b),
        }
    }
}

impl From<Color> for PackedRgba {
    fn from(color: Color) -> Self {
        color.to_packed()
    }
}

/// Error returned when a color name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color {:?} (expected a name or #rrggbb)", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts the base color names (case-insensitive), `clear`/`default`,
    /// and `#rrggbb` hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let color = match lower.as_str() {
            "clear" | "default" | "reset" => Self::Clear,
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            hex if hex.len() == 7 && hex.starts_with('#') => {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
                };
                Self::Rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?)
            }
            _ => return Err(ParseColorError(s.to_string())),
        };
        Ok(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_is_transparent() {
        assert_eq!(Color::Clear.to_packed(), PackedRgba::TRANSPARENT);
        assert_eq!(Color::default(), Color::Clear);
    }

    #[test]
    fn rgb_passes_through() {
        assert_eq!(
            PackedRgba::from(Color::Rgb(1, 2, 3)),
            PackedRgba::rgb(1, 2, 3)
        );
    }

    #[test]
    fn named_colors_are_opaque() {
        for c in [Color::Black, Color::Red, Color::Cyan, Color::White] {
            assert_eq!(c.to_packed().a(), 255, "{c:?}");
        }
    }

    #[test]
    fn parse_names_case_insensitive() {
        assert_eq!("Red".parse::<Color>(), Ok(Color::Red));
        assert_eq!(" cyan ".parse::<Color>(), Ok(Color::Cyan));
        assert_eq!("default".parse::<Color>(), Ok(Color::Clear));
    }

    #[test]
    fn parse_hex() {
        assert_eq!("#ff8000".parse::<Color>(), Ok(Color::Rgb(255, 128, 0)));
        assert!("#ff80zz".parse::<Color>().is_err());
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "chartreuse".parse::<Color>().unwrap_err();
        assert!(err.to_string().contains("chartreuse"));
    }
}
