//! Image-space geometry: points and axis-aligned rectangles.

/// An integer pixel coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in image space.
///
/// Width and height are unsigned, so every `Rect` is already normalized.
/// A 0x0 rectangle is the "no result" value produced by region growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The 0x0 rectangle anchored at `corner`.
    #[inline]
    pub const fn degenerate(corner: Point) -> Self {
        Self::new(corner.x, corner.y, 0, 0)
    }

    /// Rectangle spanned by two opposite corners, in any order.
    ///
    /// ```
    /// use shade_engine::{Point, Rect};
    /// let r = Rect::from_corners(Point::new(30, 5), Point::new(10, 25));
    /// assert_eq!(r, Rect::new(10, 5, 20, 20));
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    /// Normalize a rectangle whose extents may be negative, as produced by
    /// dragging an edge past the opposite one. Parts left of or above the
    /// image origin are cut off.
    ///
    /// ```
    /// use shade_engine::Rect;
    /// assert_eq!(Rect::from_signed(50, 40, -20, 10), Rect::new(30, 40, 20, 10));
    /// assert_eq!(Rect::from_signed(-5, 0, 10, 10), Rect::new(0, 0, 5, 10));
    /// ```
    pub fn from_signed(x: i64, y: i64, width: i64, height: i64) -> Self {
        let (x0, x1) = ordered(x, x.saturating_add(width));
        let (y0, y1) = ordered(y, y.saturating_add(height));
        let clamp = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
        let (x0, x1) = (clamp(x0), clamp(x1));
        let (y0, y1) = (clamp(y0), clamp(y1));
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// True for a zero-area rectangle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Intersection with an image of the given size.
    pub fn clip_to(&self, width: u32, height: u32) -> Rect {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        let x1 = self.right().min(width as u64) as u32;
        let y1 = self.bottom().min(height as u64) as u32;
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// True when `p` lies inside the half-open rectangle.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && (p.x as u64) < self.right()
            && (p.y as u64) < self.bottom()
    }
}

#[inline]
fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
