//! Region sampling with median-relative outlier pruning.

use super::ColorSample;
use crate::distance::{ciede2000_weighted, Weights};
use crate::geometry::Rect;
use crate::pixels::PixelSource;

/// Colors at least this far (ΔE2000) from the median are pruned.
pub const DEFAULT_PRUNE_THRESHOLD: f64 = 15.0;

/// Turns rectangular regions into pruned [`ColorSample`]s.
///
/// Pruning discards the shadow, highlight and background pixels that a hand
/// drawn rectangle inevitably catches at its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    pub prune_threshold: f64,
    pub weights: Weights,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
            weights: Weights::default(),
        }
    }
}

impl Sampler {
    pub fn new(prune_threshold: f64) -> Self {
        Self {
            prune_threshold,
            ..Self::default()
        }
    }

    /// Concatenate the pixels of every region, order them by lightness and
    /// prune outliers. No regions (or only empty ones) give an empty sample.
    pub fn sample<S: PixelSource + ?Sized>(&self, regions: &[Rect], source: &S) -> ColorSample {
        let colors = regions
            .iter()
            .flat_map(|rect| source.pixels_in(*rect))
            .collect::<Vec<_>>();
        self.prune(&ColorSample::from_colors(colors))
    }

    /// Keep the colors strictly closer than `prune_threshold` to the median.
    pub fn prune(&self, sample: &ColorSample) -> ColorSample {
        let Some(median) = sample.median() else {
            return ColorSample::default();
        };
        let reference = median.to_lab();
        sample.retain_new(|c| {
            ciede2000_weighted(c.to_lab(), reference, self.weights) < self.prune_threshold
        })
    }
}
