//! Color types and conversion utilities
//!
//! Conversions run one way, from the 8-bit sRGB read out of a photograph to
//! the spaces the engine measures and orders in:
//!
//! ```text
//! Srgb (u8) --LUT--> LinearRgb --matrix--> Xyz --clamp, f(t)--> Lab
//!    |
//!    +--> Hsl (lightness is the sample sort key)
//! ```
//!
//! # Example
//!
//! ```
//! use shade_engine::{Lab, Srgb};
//!
//! let tooth = Srgb::new(226, 214, 187);
//! let lab = Lab::from(tooth);
//! assert!(lab.l > 80.0 && lab.b > 0.0);
//! ```

mod error;
mod hsl;
mod lab;
mod linear_rgb;
mod lut;
mod srgb;
mod xyz;

pub use error::ParseColorError;
pub use hsl::Hsl;
pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
pub use xyz::{Xyz, D65_WHITE};
