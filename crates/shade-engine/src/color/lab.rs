//! CIE L*a*b* color type (D65 reference white)
//!
//! The space CIEDE2000 is defined over. Lab values are derived per
//! comparison and never stored.

use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;
use super::xyz::Xyz;

/// CIE threshold between the cube-root and linear segments of `f(t)`.
const EPSILON: f64 = 0.008856;
/// CIE slope of the linear segment (`kappa * t + 16) / 116`).
const KAPPA: f64 = 903.3;

/// A color in CIE Lab space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis (negative = green)
/// - `b`: Blue-yellow axis (negative = blue)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    ///
    /// ```
    /// use shade_engine::Lab;
    /// let grey = Lab::new(50.0, 0.0, 0.0);
    /// assert_eq!(grey.chroma(), 0.0);
    /// ```
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Magnitude of the (a, b) vector.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// CIEDE2000 distance to `other` with unit weights.
    #[inline]
    pub fn delta_e(self, other: Lab) -> f64 {
        crate::distance::ciede2000(self, other)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

impl From<Xyz> for Lab {
    /// Clamp to the reference white, then apply the CIE nonlinearity to the
    /// raw tristimulus values.
    ///
    /// X and Z are not divided by the white point, so neutral greys carry a
    /// small constant green-blue offset (white is `Lab(100, -8.40, -5.75)`).
    /// Every ΔE the engine reports is measured on this scale.
    fn from(xyz: Xyz) -> Self {
        let xyz = xyz.clamped();
        let fx = lab_f(xyz.x);
        let fy = lab_f(xyz.y);
        let fz = lab_f(xyz.z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<LinearRgb> for Lab {
    fn from(rgb: LinearRgb) -> Self {
        Lab::from(Xyz::from(rgb))
    }
}

impl From<Srgb> for Lab {
    fn from(srgb: Srgb) -> Self {
        Lab::from(LinearRgb::from(srgb))
    }
}
