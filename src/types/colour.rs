//! Opaque colours for the SVG surface.

use serde::{Serialize, Serializer};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Default ink for poster text.
    pub const INK: Self = Self::rgb(17, 17, 17);

    /// Muted grey used for divider rules and dots.
    pub const RULE: Self = Self::rgb(156, 163, 175);

    /// `#RRGGBB`, as SVG paint attributes take it.
    pub fn svg_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.svg_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_hex_is_uppercase() {
        assert_eq!(Colour::rgb(0x1a, 0x1a, 0x2e).svg_hex(), "#1A1A2E");
        assert_eq!(Colour::WHITE.svg_hex(), "#FFFFFF");
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&Colour::RULE).unwrap();
        assert_eq!(json, "\"#9CA3AF\"");
    }
}
