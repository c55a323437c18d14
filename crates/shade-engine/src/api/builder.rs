//! ShadeMatcher builder: the primary entry point for the crate.

use super::EngineError;
use crate::compare::MatchReport;
use crate::distance::Weights;
use crate::geometry::{Point, Rect};
use crate::pixels::PixelSource;
use crate::region::{
    Growth, RegionGrower, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_REGION_SIZE, DEFAULT_TOLERANCE,
};
use crate::sample::{ColorSample, Sampler, DEFAULT_PRUNE_THRESHOLD};

/// Every tunable of the matcher in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// ΔE2000 cutoff from the median used when pruning samples.
    pub prune_threshold: f64,
    /// ΔE2000 cutoff from the seed color used when growing regions.
    pub tolerance: f64,
    pub min_region_size: usize,
    pub max_iterations: usize,
    pub weights: Weights,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
            tolerance: DEFAULT_TOLERANCE,
            min_region_size: DEFAULT_MIN_REGION_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            weights: Weights::default(),
        }
    }
}

impl MatchOptions {
    /// Check every option is in range.
    ///
    /// Thresholds must be finite and non-negative (the prune threshold
    /// strictly positive), the iteration budget non-zero and all weights
    /// finite and positive.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |name, value| Err(EngineError::InvalidOption { name, value });

        if !self.prune_threshold.is_finite() || self.prune_threshold <= 0.0 {
            return invalid("prune_threshold", self.prune_threshold);
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return invalid("tolerance", self.tolerance);
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations", 0.0);
        }
        let w = self.weights;
        for (name, value) in [
            ("weights.lightness", w.lightness),
            ("weights.chroma", w.chroma),
            ("weights.hue", w.hue),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(name, value);
            }
        }
        Ok(())
    }
}

/// High-level shade matcher.
///
/// Configuration methods consume and return `self`; the matching methods
/// take `&self` so one matcher serves any number of images.
///
/// # Example
///
/// ```
/// use shade_engine::{PixelBuffer, Rect, ShadeMatcher, Srgb};
///
/// let mut image = PixelBuffer::filled(60, 20, Srgb::new(0, 0, 0));
/// image.fill_rect(Rect::new(0, 0, 20, 20), Srgb::new(230, 215, 190));
/// image.fill_rect(Rect::new(20, 0, 20, 20), Srgb::new(120, 60, 40));
/// image.fill_rect(Rect::new(40, 0, 20, 20), Srgb::new(228, 214, 191));
///
/// let matcher = ShadeMatcher::new().prune_threshold(10.0);
/// let report = matcher.find_best_match(
///     &[Rect::new(2, 2, 10, 10)],
///     &[vec![Rect::new(22, 2, 10, 10)], vec![Rect::new(42, 2, 10, 10)]],
///     &image,
/// );
/// assert_eq!(report.best, Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShadeMatcher {
    options: MatchOptions,
}

impl ShadeMatcher {
    /// A matcher with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A matcher from checked options.
    ///
    /// This is the only constructor that validates. The fluent setters below
    /// store whatever they are given; call [`validate`](Self::validate) after
    /// chaining them when the values come from outside the program.
    pub fn from_options(options: MatchOptions) -> Result<Self, EngineError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Check the current options, as [`from_options`](Self::from_options) does.
    ///
    /// ```
    /// use shade_engine::ShadeMatcher;
    /// assert!(ShadeMatcher::new().tolerance(4.0).validate().is_ok());
    /// assert!(ShadeMatcher::new().prune_threshold(f64::NAN).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), EngineError> {
        self.options.validate()
    }

    #[inline]
    pub fn prune_threshold(mut self, threshold: f64) -> Self {
        self.options.prune_threshold = threshold;
        self
    }

    #[inline]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.options.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn min_region_size(mut self, size: usize) -> Self {
        self.options.min_region_size = size;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.options.max_iterations = iterations;
        self
    }

    /// Set the CIEDE2000 weights used everywhere the matcher measures color.
    #[inline]
    pub fn weights(mut self, weights: Weights) -> Self {
        self.options.weights = weights;
        self
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    fn sampler(&self) -> Sampler {
        Sampler {
            prune_threshold: self.options.prune_threshold,
            weights: self.options.weights,
        }
    }

    fn grower(&self) -> RegionGrower {
        RegionGrower {
            tolerance: self.options.tolerance,
            min_region_size: self.options.min_region_size,
            max_iterations: self.options.max_iterations,
            weights: self.options.weights,
        }
    }

    /// Pruned, lightness-ordered sample of `regions`.
    pub fn sample<S: PixelSource + ?Sized>(&self, regions: &[Rect], source: &S) -> ColorSample {
        self.sampler().sample(regions, source)
    }

    /// Sample the target regions and every candidate group, then pick the
    /// candidate closest to the target.
    ///
    /// Candidates whose regions yield no pixels are skipped. With no
    /// candidates, or an empty target, the report has no winner.
    pub fn find_best_match<S: PixelSource + ?Sized>(
        &self,
        target: &[Rect],
        candidates: &[Vec<Rect>],
        source: &S,
    ) -> MatchReport {
        let sampler = self.sampler();
        let target = sampler.sample(target, source);
        let candidates: Vec<ColorSample> = candidates
            .iter()
            .map(|regions| sampler.sample(regions, source))
            .collect();
        MatchReport::evaluate(&target, &candidates, self.options.weights)
    }

    /// Flood-fill from `seed`.
    pub fn grow_region<S: PixelSource + ?Sized>(&self, seed: Point, source: &S) -> Growth {
        self.grower().grow(seed, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use crate::pixels::PixelBuffer;

    #[test]
    fn test_default_options_validate() {
        assert!(MatchOptions::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_options() {
        let cases = [
            MatchOptions {
                prune_threshold: 0.0,
                ..Default::default()
            },
            MatchOptions {
                tolerance: -1.0,
                ..Default::default()
            },
            MatchOptions {
                tolerance: f64::NAN,
                ..Default::default()
            },
            MatchOptions {
                max_iterations: 0,
                ..Default::default()
            },
            MatchOptions {
                weights: Weights {
                    hue: 0.0,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];
        for options in cases {
            assert!(
                ShadeMatcher::from_options(options).is_err(),
                "accepted {:?}",
                options
            );
        }
    }

    #[test]
    fn test_setters_defer_validation() {
        let matcher = ShadeMatcher::new().prune_threshold(f64::NAN);
        assert!(matches!(
            matcher.validate(),
            Err(EngineError::InvalidOption {
                name: "prune_threshold",
                ..
            })
        ));
        assert!(ShadeMatcher::new()
            .weights(Weights {
                chroma: -1.0,
                ..Weights::default()
            })
            .validate()
            .is_err());
        assert!(ShadeMatcher::new().tolerance(0.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_option_names_field() {
        let err = MatchOptions {
            tolerance: -2.0,
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidOption {
                name: "tolerance",
                value: -2.0
            }
        );
        assert_eq!(err.to_string(), "invalid value for tolerance: -2");
    }

    #[test]
    fn test_setters_reach_options() {
        let matcher = ShadeMatcher::new()
            .prune_threshold(9.0)
            .tolerance(4.0)
            .min_region_size(10)
            .max_iterations(100);
        let o = matcher.options();
        assert_eq!(o.prune_threshold, 9.0);
        assert_eq!(o.tolerance, 4.0);
        assert_eq!(o.min_region_size, 10);
        assert_eq!(o.max_iterations, 100);
    }

    #[test]
    fn test_no_candidates_reports_sentinel() {
        let image = PixelBuffer::filled(10, 10, Srgb::new(200, 200, 200));
        let report = ShadeMatcher::new().find_best_match(&[Rect::new(0, 0, 5, 5)], &[], &image);
        assert_eq!(report.best, None);
        assert_eq!(report.sentinel_index(), -1);
    }

    #[test]
    fn test_empty_candidate_regions_are_skipped() {
        let image = PixelBuffer::filled(10, 10, Srgb::new(200, 200, 200));
        let report = ShadeMatcher::new().find_best_match(
            &[Rect::new(0, 0, 5, 5)],
            &[vec![], vec![Rect::new(5, 5, 5, 5)]],
            &image,
        );
        assert_eq!(report.best, Some(1));
        assert_eq!(report.distances[0], None);
    }

    #[test]
    fn test_grow_region_uses_configured_limits() {
        let image = PixelBuffer::filled(30, 30, Srgb::new(200, 200, 200));
        let growth = ShadeMatcher::new()
            .max_iterations(50)
            .grow_region(Point::new(15, 15), &image);
        assert!(matches!(growth, Growth::Runaway { .. }));

        let growth = ShadeMatcher::new()
            .min_region_size(10)
            .grow_region(Point::new(15, 15), &image);
        assert_eq!(growth, Growth::Region(Rect::new(0, 0, 29, 29)));
    }
}
