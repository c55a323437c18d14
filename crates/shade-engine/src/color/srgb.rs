//! sRGB color type
//!
//! 8-bit, gamma-encoded sRGB as read from a photograph. This is the only
//! color type that crosses the engine boundary; every other space is derived.

use std::fmt;
use std::str::FromStr;

use super::error::ParseColorError;
use super::hsl::Hsl;
use super::lab::Lab;

/// A color in sRGB color space with one byte per channel.
///
/// Immutable value type. Conversions to [`Lab`] and [`Hsl`] are total over
/// the whole 8-bit domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Srgb {
    /// Create an Srgb color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use shade_engine::Srgb;
    /// let red = Srgb::new(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as lowercase `#rrggbb`.
    ///
    /// ```
    /// use shade_engine::Srgb;
    /// assert_eq!(Srgb::new(255, 128, 0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CIE Lab (D65) of this color.
    #[inline]
    pub fn to_lab(self) -> Lab {
        Lab::from(self)
    }

    /// HSL of this color. Only used as an ordering key.
    #[inline]
    pub fn to_hsl(self) -> Hsl {
        Hsl::from(self)
    }

    /// HSL lightness in 0.0..=1.0, the sort key for color samples.
    #[inline]
    pub fn lightness(self) -> f64 {
        self.to_hsl().l
    }

    /// CIEDE2000 distance to `other` with unit weights.
    ///
    /// ```
    /// use shade_engine::Srgb;
    /// let black = Srgb::new(0, 0, 0);
    /// let white = Srgb::new(255, 255, 255);
    /// assert!((black.delta_e(white) - 100.0).abs() < 1.0);
    /// ```
    #[inline]
    pub fn delta_e(self, other: Srgb) -> f64 {
        crate::distance::ciede2000(self.to_lab(), other.to_lab())
    }
}

impl From<[u8; 3]> for Srgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use shade_engine::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Srgb::new(255, 255, 255));
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Srgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let color = Srgb::new(255, 128, 0);
        assert_eq!(Srgb::from_bytes([255, 128, 0]), color);
        assert_eq!(Srgb::from([255, 128, 0]), color);
        assert_eq!(color.to_bytes(), [255, 128, 0]);
    }

    #[test]
    fn test_hex_round_trip_display() {
        let color = Srgb::new(0x12, 0xab, 0x09);
        assert_eq!(color.to_hex(), "#12ab09");
        assert_eq!(color.to_string(), "#12ab09");
        assert_eq!(color.to_hex().parse::<Srgb>().unwrap(), color);
    }

    #[test]
    fn test_hex_parsing_6digit() {
        assert_eq!("#FFFFFF".parse::<Srgb>().unwrap(), Srgb::new(255, 255, 255));
        assert_eq!("#000000".parse::<Srgb>().unwrap(), Srgb::new(0, 0, 0));
        assert_eq!("FF0000".parse::<Srgb>().unwrap(), Srgb::new(255, 0, 0));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        assert_eq!("#fff".parse::<Srgb>().unwrap(), Srgb::new(255, 255, 255));
        assert_eq!("#ABC".parse::<Srgb>().unwrap(), Srgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Srgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Srgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Srgb>(), Err(ParseColorError::InvalidLength)));
        assert!(matches!("#".parse::<Srgb>(), Err(ParseColorError::InvalidLength)));
        // multi-byte characters must not panic on slicing
        assert!("#é12".parse::<Srgb>().is_err());
    }

    #[test]
    fn test_hex_parsing_whitespace_and_case() {
        let upper: Srgb = "  #ABCDEF  ".parse().unwrap();
        let lower: Srgb = "#abcdef".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(Srgb::new(0, 0, 0).lightness(), 0.0);
        assert_eq!(Srgb::new(255, 255, 255).lightness(), 1.0);
        // pure red: (1 + 0) / 2
        assert_eq!(Srgb::new(255, 0, 0).lightness(), 0.5);
    }
}
