#![allow(clippy::excessive_precision)]

//! shade-engine: perceptual color matching for shade selection
//!
//! Given regions drawn over a photograph (a tooth, and a row of shade-guide
//! tabs), the engine samples their colors, discards outliers and picks the
//! candidate that is perceptually closest to the target. It can also grow a
//! rectangular selection from a single clicked pixel.
//!
//! # Quick Start
//!
//! The [`ShadeMatcher`] builder is the primary entry point:
//!
//! ```
//! use shade_engine::{PixelBuffer, Point, Rect, ShadeMatcher, Srgb};
//!
//! let mut image = PixelBuffer::filled(64, 64, Srgb::new(10, 10, 10));
//! image.fill_rect(Rect::new(0, 0, 32, 32), Srgb::new(226, 214, 187));
//!
//! let matcher = ShadeMatcher::new().min_region_size(100);
//! let growth = matcher.grow_region(Point::new(5, 5), &image);
//! assert_eq!(growth.rect(), Rect::new(0, 0, 31, 31));
//! ```
//!
//! The engine never decodes image files. Anything implementing
//! [`PixelSource`] can be matched; [`PixelBuffer`] is the owned in-memory
//! implementation.
//!
//! # Color Science
//!
//! ## One Metric Everywhere
//!
//! Every "how different are these two colors" question is answered with
//! CIEDE2000 over CIE L\*a\*b\*:
//!
//! | Step | Question | Threshold |
//! |------|----------|-----------|
//! | Pruning | is this pixel an outlier relative to the sample median? | ΔE < 15 keeps it |
//! | Comparison | how far apart are two samples, rank by rank? | mean ΔE |
//! | Region growing | does this neighbor look like the seed? | ΔE ≤ 2.8 joins |
//!
//! The Lab nonlinearity is applied to the clamped XYZ values directly, without
//! dividing by the white point. Neutral greys therefore sit on one fixed hue
//! (white is `Lab(100, -8.40, -5.75)`), and distances between greys have no
//! hue component.
//!
//! ## Lightness Order
//!
//! Samples are ordered by HSL lightness `(max + min) / 2`, not by Lab L\*.
//! The sort key only decides which pixel is the median and which ranks get
//! paired during comparison; distances are always measured in Lab.
//!
//! ## Rank-Centered Comparison
//!
//! Two samples rarely have the same number of pixels. [`compare_groups`]
//! centers the shorter sample's index window on the midpoint of the longer
//! one and averages ΔE over paired ranks, so a small tooth sample and a
//! large tab sample are compared by relative lightness rank rather than by
//! absolute position.
//!
//! ## Bounded Flood Fill
//!
//! [`RegionGrower`] runs a 4-connected breadth-first fill against the
//! seed's color. Three guards turn a fill into "no selection" (a 0×0
//! rectangle at the seed) instead of a result:
//!
//! - more than 80,000 dequeued pixels (the click landed on background)
//! - fewer than 500 pixels reached (the click landed on noise)
//! - a seed outside the image

pub mod api;
pub mod color;
pub mod compare;
pub mod distance;
pub mod geometry;
pub mod pixels;
pub mod region;
pub mod sample;


pub use api::{EngineError, MatchOptions, ShadeMatcher};
pub use color::{Hsl, Lab, LinearRgb, ParseColorError, Srgb, Xyz, D65_WHITE};
pub use compare::{
    compare_groups, compare_groups_weighted, select_best_match, MatchReport, NO_MATCH,
};
pub use distance::{ciede2000, ciede2000_weighted, Weights};
pub use geometry::{Point, Rect};
pub use pixels::{PixelBuffer, PixelSource};
pub use region::{
    Growth, RegionGrower, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_REGION_SIZE, DEFAULT_TOLERANCE,
};
pub use sample::{ColorSample, Sampler, DEFAULT_PRUNE_THRESHOLD};
