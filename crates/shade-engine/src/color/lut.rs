//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs and holds the exact
//! IEC 61966-2-1 linearization of every 8-bit channel value.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Linearize one 8-bit sRGB channel.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}
