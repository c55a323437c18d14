//! Color samples: lightness-ordered color populations taken from regions
//!
//! A [`ColorSample`] is always sorted by ascending HSL lightness and is never
//! modified after construction; pruning returns a new sample.

mod sampler;

pub use sampler::{Sampler, DEFAULT_PRUNE_THRESHOLD};

use crate::color::Srgb;

/// An immutable, lightness-ordered sequence of colors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorSample {
    colors: Vec<Srgb>,
}

impl ColorSample {
    /// Sort `colors` by ascending HSL lightness.
    ///
    /// The sort is stable: colors of equal lightness keep their input order.
    ///
    /// ```
    /// use shade_engine::{ColorSample, Srgb};
    ///
    /// let s = ColorSample::from_colors(vec![Srgb::new(200, 200, 200), Srgb::new(10, 10, 10)]);
    /// assert_eq!(s.as_slice()[0], Srgb::new(10, 10, 10));
    /// ```
    pub fn from_colors(mut colors: Vec<Srgb>) -> Self {
        colors.sort_by(|a, b| a.lightness().total_cmp(&b.lightness()));
        Self { colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Srgb] {
        &self.colors
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Srgb> {
        self.colors.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Srgb> {
        self.colors.iter()
    }

    /// The element at index `len / 2` (rounded down), or `None` when empty.
    ///
    /// For even lengths this is the upper of the two middle elements.
    #[inline]
    pub fn median(&self) -> Option<Srgb> {
        self.colors.get(self.colors.len() / 2).copied()
    }

    /// Keep only the colors for which `keep` returns true, preserving order.
    pub fn retain_new(&self, mut keep: impl FnMut(Srgb) -> bool) -> ColorSample {
        ColorSample {
            colors: self.colors.iter().copied().filter(|c| keep(*c)).collect(),
        }
    }
}

impl From<Vec<Srgb>> for ColorSample {
    fn from(colors: Vec<Srgb>) -> Self {
        Self::from_colors(colors)
    }
}

impl FromIterator<Srgb> for ColorSample {
    fn from_iter<I: IntoIterator<Item = Srgb>>(iter: I) -> Self {
        Self::from_colors(iter.into_iter().collect())
    }
}
