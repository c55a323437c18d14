//! Group comparison and nearest-match selection.

use crate::distance::{ciede2000_weighted, Weights};
use crate::sample::ColorSample;

/// Index reported across the engine boundary when nothing matched.
pub const NO_MATCH: i64 = -1;

/// Average ΔE2000 between two samples, compared rank by rank.
///
/// The shorter sample's index window is centered on the midpoint of the
/// longer one, so samples of different sizes are compared by relative
/// lightness rank rather than absolute position. Indices past the end of a
/// sample are clamped to its last element.
///
/// Returns `None` when either sample is empty.
///
/// ```
/// use shade_engine::{compare_groups, ColorSample, Srgb};
///
/// let a = ColorSample::from_colors(vec![Srgb::new(100, 100, 100); 4]);
/// assert_eq!(compare_groups(&a, &a), Some(0.0));
/// assert_eq!(compare_groups(&a, &ColorSample::default()), None);
/// ```
#[inline]
pub fn compare_groups(a: &ColorSample, b: &ColorSample) -> Option<f64> {
    compare_groups_weighted(a, b, Weights::default())
}

/// [`compare_groups`] with explicit CIEDE2000 weights.
pub fn compare_groups_weighted(a: &ColorSample, b: &ColorSample, weights: Weights) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let min_len = a.len().min(b.len()) as i64;
    let max_len = a.len().max(b.len()) as i64;
    let mid = max_len / 2;

    let pick = |sample: &ColorSample, offset: i64| {
        let last = sample.len() - 1;
        let index = ((offset + mid) as usize).min(last);
        sample.as_slice()[index]
    };

    let mut total = 0.0;
    let mut count = 0usize;
    for offset in -mid..(min_len - mid) {
        let ca = pick(a, offset);
        let cb = pick(b, offset);
        total += ciede2000_weighted(ca.to_lab(), cb.to_lab(), weights);
        count += 1;
    }

    Some(total / count as f64)
}

/// Per-candidate distances and the winning index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchReport {
    /// Index of the closest candidate, `None` when nothing could be compared.
    pub best: Option<usize>,
    /// Group distance per candidate; `None` for candidates that were skipped
    /// because their sample (or the target) was empty.
    pub distances: Vec<Option<f64>>,
}

impl MatchReport {
    /// Compare `target` against every candidate.
    pub fn evaluate(target: &ColorSample, candidates: &[ColorSample], weights: Weights) -> Self {
        let distances: Vec<Option<f64>> = candidates
            .iter()
            .map(|c| compare_groups_weighted(target, c, weights))
            .collect();
        let best = argmin(&distances);
        Self { best, distances }
    }

    /// The winning index, or [`NO_MATCH`].
    pub fn sentinel_index(&self) -> i64 {
        self.best.map_or(NO_MATCH, |i| i as i64)
    }

    /// Distance of the winning candidate.
    pub fn best_distance(&self) -> Option<f64> {
        self.best.and_then(|i| self.distances[i])
    }
}

/// Index of the candidate closest to `target`.
///
/// Ties resolve to the lowest index. Candidates with empty samples never win.
/// `None` when there are no candidates, the target is empty, or every
/// candidate is empty.
///
/// ```
/// use shade_engine::{select_best_match, ColorSample, Srgb};
///
/// let target = ColorSample::from_colors(vec![Srgb::new(220, 210, 190); 3]);
/// let far = ColorSample::from_colors(vec![Srgb::new(20, 40, 200); 3]);
/// assert_eq!(select_best_match(&target, &[far, target.clone()]), Some(1));
/// assert_eq!(select_best_match(&target, &[]), None);
/// ```
pub fn select_best_match(target: &ColorSample, candidates: &[ColorSample]) -> Option<usize> {
    MatchReport::evaluate(target, candidates, Weights::default()).best
}

/// Stable argmin over the defined entries.
fn argmin(values: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        let Some(v) = *v else { continue };
        match best {
            Some((_, current)) if v >= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
