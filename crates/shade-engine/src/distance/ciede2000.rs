//! CIEDE2000 color difference (Sharma, Wu & Dalal 2005)
//!
//! Every intermediate term is a local value; the function has no state.
//!
//! Two branch choices decide results near the hue wrap-around and must stay
//! as written:
//!
//! - Δh' is forced to 0 when either input chroma (C, not C') is 0.
//! - H̄' adds 360 before halving whenever |h'1 - h'2| > 180, without the
//!   usual "subtract 360 when the sum is already >= 360" branch. `T` is
//!   360-periodic so only `R_T` sees the difference, and there it is below
//!   1e-5 ΔE.

use crate::color::Lab;

/// 25^7, the chroma scale of the G correction and of R_C.
const POW25_7: f64 = 6_103_515_625.0;

/// Parametric weights `kL`, `kC`, `kH`. All default to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub lightness: f64,
    pub chroma: f64,
    pub hue: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            lightness: 1.0,
            chroma: 1.0,
            hue: 1.0,
        }
    }
}

impl Weights {
    /// True when every weight is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.lightness, self.chroma, self.hue]
            .iter()
            .all(|w| w.is_finite() && *w > 0.0)
    }
}

/// CIEDE2000 distance with unit weights.
///
/// ```
/// use shade_engine::{ciede2000, Lab};
///
/// let a = Lab::new(50.0, 2.6772, -79.7751);
/// let b = Lab::new(50.0, 0.0, -82.7485);
/// assert!((ciede2000(a, b) - 2.0425).abs() < 1e-4);
/// ```
#[inline]
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    ciede2000_weighted(lab1, lab2, Weights::default())
}

/// CIEDE2000 distance with explicit parametric weights.
pub fn ciede2000_weighted(lab1: Lab, lab2: Lab, weights: Weights) -> f64 {
    let delta_l_prime = lab2.l - lab1.l;
    let l_bar = (lab1.l + lab2.l) / 2.0;

    let c1 = lab1.chroma();
    let c2 = lab2.chroma();
    let c_bar = (c1 + c2) / 2.0;

    let c_bar7 = c_bar.powi(7);
    let g = 1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt();
    let a_prime1 = lab1.a + lab1.a / 2.0 * g;
    let a_prime2 = lab2.a + lab2.a / 2.0 * g;

    let c_prime1 = a_prime1.hypot(lab1.b);
    let c_prime2 = a_prime2.hypot(lab2.b);
    let c_bar_prime = (c_prime1 + c_prime2) / 2.0;
    let delta_c_prime = c_prime2 - c_prime1;

    let s_l = 1.0 + (0.015 * (l_bar - 50.0).powi(2)) / (20.0 + (l_bar - 50.0).powi(2)).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_prime;

    let h_prime1 = hue_angle(lab1.b, a_prime1);
    let h_prime2 = hue_angle(lab2.b, a_prime2);

    let delta_h_small = if c1 == 0.0 || c2 == 0.0 {
        // hue is undefined for an achromatic input
        0.0
    } else if (h_prime1 - h_prime2).abs() <= 180.0 {
        h_prime2 - h_prime1
    } else if h_prime2 <= h_prime1 {
        h_prime2 - h_prime1 + 360.0
    } else {
        h_prime2 - h_prime1 - 360.0
    };

    let delta_h_big =
        2.0 * (c_prime1 * c_prime2).sqrt() * (delta_h_small.to_radians() / 2.0).sin();

    let h_bar_prime = if (h_prime1 - h_prime2).abs() > 180.0 {
        (h_prime1 + h_prime2 + 360.0) / 2.0
    } else {
        (h_prime1 + h_prime2) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_prime - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_prime).to_radians().cos()
        + 0.32 * (3.0 * h_bar_prime + 6.0).to_radians().cos()
        - 0.2 * (4.0 * h_bar_prime - 63.0).to_radians().cos();
    let s_h = 1.0 + 0.015 * c_bar_prime * t;

    let c_bar_prime7 = c_bar_prime.powi(7);
    let r_t = -2.0
        * (c_bar_prime7 / (c_bar_prime7 + POW25_7)).sqrt()
        * (60.0 * (-((h_bar_prime - 275.0) / 25.0).powi(2)).exp())
            .to_radians()
            .sin();

    let lightness = delta_l_prime / (weights.lightness * s_l);
    let chroma = delta_c_prime / (weights.chroma * s_c);
    let hue = delta_h_big / (weights.hue * s_h);

    // R_T can pull the radicand a few ulps below zero for identical inputs
    (lightness.powi(2) + chroma.powi(2) + hue.powi(2) + r_t * chroma * hue)
        .max(0.0)
        .sqrt()
}

/// atan2(b, a') in degrees, normalized to [0, 360). 0 when both are 0.
#[inline]
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }
    let angle = b.atan2(a_prime).to_degrees();
    if angle >= 0.0 {
        angle
    } else {
        angle + 360.0
    }
}
