//! Perceptual color difference
//!
//! CIEDE2000 is the single metric used throughout the engine: for pruning
//! samples, for comparing groups, and as the flood-fill similarity predicate.

mod ciede2000;

pub use ciede2000::{ciede2000, ciede2000_weighted, Weights};
