//! CIE 1931 XYZ tristimulus values (D65, Y of white = 1.0)

use super::linear_rgb::LinearRgb;

/// A color in CIE XYZ space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// D65 reference white. Also the upper clamp for each axis before Lab.
pub const D65_WHITE: Xyz = Xyz {
    x: 0.95047,
    y: 1.0,
    z: 1.08883,
};

/// Linear sRGB to XYZ, D65 primaries.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.072175],
    [0.0193339, 0.119192, 0.9503041],
];

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Clamp each axis to `[0, white]`.
    ///
    /// Matrix rounding lets pure white land a hair above the reference
    /// (Y = 1.0000001); clamping keeps the Lab lightness of white at exactly 100.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, D65_WHITE.x),
            y: self.y.clamp(0.0, D65_WHITE.y),
            z: self.z.clamp(0.0, D65_WHITE.z),
        }
    }
}

impl From<LinearRgb> for Xyz {
    fn from(rgb: LinearRgb) -> Self {
        let m = &RGB_TO_XYZ;
        Self {
            x: m[0][0] * rgb.r + m[0][1] * rgb.g + m[0][2] * rgb.b,
            y: m[1][0] * rgb.r + m[1][1] * rgb.g + m[1][2] * rgb.b,
            z: m[2][0] * rgb.r + m[2][1] * rgb.g + m[2][2] * rgb.b,
        }
    }
}
