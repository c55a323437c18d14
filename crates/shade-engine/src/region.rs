//! Tolerance-bounded region growing (one-click selection)
//!
//! Breadth-first flood fill over 4-connected neighbors. A neighbor joins the
//! region when its ΔE2000 to the *seed* color is within tolerance; comparing
//! against the seed rather than the neighbor that reached it keeps the fill
//! from creeping along gradients.

use std::collections::VecDeque;

use crate::distance::{ciede2000_weighted, Weights};
use crate::geometry::{Point, Rect};
use crate::pixels::PixelSource;

pub const DEFAULT_TOLERANCE: f64 = 2.8;
pub const DEFAULT_MIN_REGION_SIZE: usize = 500;
pub const DEFAULT_MAX_ITERATIONS: usize = 80_000;

/// Outcome of [`RegionGrower::grow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Growth {
    /// A region large enough to select.
    Region(Rect),
    /// More than `max_iterations` pixels were dequeued.
    Runaway { seed: Point, iterations: usize },
    /// The filled area had fewer than `min_region_size` pixels.
    TooSmall { seed: Point, size: usize },
    /// The seed is not inside the image.
    OutOfBounds { seed: Point },
}

impl Growth {
    /// The selected rectangle, or the 0x0 rectangle at the seed for every
    /// outcome that declines to select.
    pub fn rect(&self) -> Rect {
        match *self {
            Growth::Region(rect) => rect,
            Growth::Runaway { seed, .. }
            | Growth::TooSmall { seed, .. }
            | Growth::OutOfBounds { seed } => Rect::degenerate(seed),
        }
    }

    #[inline]
    pub fn is_region(&self) -> bool {
        matches!(self, Growth::Region(_))
    }

    /// Short machine-readable name of the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            Growth::Region(_) => "region",
            Growth::Runaway { .. } => "runaway",
            Growth::TooSmall { .. } => "too_small",
            Growth::OutOfBounds { .. } => "out_of_bounds",
        }
    }
}

/// Flood-fill parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGrower {
    /// Largest ΔE2000 from the seed color a pixel may have to join.
    pub tolerance: f64,
    /// Regions with fewer pixels are treated as noise.
    pub min_region_size: usize,
    /// Dequeue budget; exceeding it aborts the fill.
    pub max_iterations: usize,
    pub weights: Weights,
}

impl Default for RegionGrower {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_region_size: DEFAULT_MIN_REGION_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            weights: Weights::default(),
        }
    }
}

impl RegionGrower {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Grow a region from `seed` and return its bounding box.
    ///
    /// The returned rectangle spans `max - min` in each axis, so a region
    /// covering columns 10..=19 has width 9.
    pub fn grow<S: PixelSource + ?Sized>(&self, seed: Point, source: &S) -> Growth {
        if !source.contains(seed) {
            return Growth::OutOfBounds { seed };
        }

        let width = source.width() as usize;
        let height = source.height() as usize;
        let index = |x: u32, y: u32| y as usize * width + x as usize;

        let reference = source.pixel(seed.x, seed.y).to_lab();

        let mut visited = vec![false; width * height];
        let mut visited_count = 1usize;
        visited[index(seed.x, seed.y)] = true;

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (seed.x, seed.y, seed.x, seed.y);

        let mut queue = VecDeque::new();
        queue.push_back(seed);
        let mut iterations = 0usize;

        while let Some(p) = queue.pop_front() {
            iterations += 1;
            if iterations > self.max_iterations {
                return Growth::Runaway { seed, iterations };
            }

            for n in neighbors(p, source.width(), source.height()).into_iter().flatten() {
                let idx = index(n.x, n.y);
                if visited[idx] {
                    continue;
                }
                let color = source.pixel(n.x, n.y).to_lab();
                if ciede2000_weighted(reference, color, self.weights) <= self.tolerance {
                    visited[idx] = true;
                    visited_count += 1;
                    min_x = min_x.min(n.x);
                    min_y = min_y.min(n.y);
                    max_x = max_x.max(n.x);
                    max_y = max_y.max(n.y);
                    queue.push_back(n);
                }
            }
        }

        if visited_count < self.min_region_size {
            return Growth::TooSmall {
                seed,
                size: visited_count,
            };
        }

        Growth::Region(Rect::from_corners(
            Point::new(min_x, min_y),
            Point::new(max_x, max_y),
        ))
    }
}

/// The in-bounds 4-connected neighbors of `p`.
#[inline]
fn neighbors(p: Point, width: u32, height: u32) -> [Option<Point>; 4] {
    [
        p.x.checked_sub(1).map(|x| Point::new(x, p.y)),
        (p.x + 1 < width).then(|| Point::new(p.x + 1, p.y)),
        p.y.checked_sub(1).map(|y| Point::new(p.x, y)),
        (p.y + 1 < height).then(|| Point::new(p.x, p.y + 1)),
    ]
}
