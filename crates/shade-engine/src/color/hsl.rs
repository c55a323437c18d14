//! HSL representation, used only to order colors
//!
//! Hue and saturation are kept for completeness of the conversion; the engine
//! sorts samples by lightness alone.

use super::srgb::Srgb;

/// Hue, saturation and lightness, each normalized to 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue as a fraction of a full turn
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl From<Srgb> for Hsl {
    fn from(c: Srgb) -> Self {
        let r = c.r as f64 / 255.0;
        let g = c.g as f64 / 255.0;
        let b = c.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // achromatic
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h / 6.0, s, l }
    }
}
