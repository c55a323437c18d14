//! Pixel access
//!
//! The engine never decodes images itself. Callers hand it anything that
//! implements [`PixelSource`]; [`PixelBuffer`] is the in-memory implementation.

use crate::color::Srgb;
use crate::geometry::{Point, Rect};

/// Read access to the pixels of a decoded image.
pub trait PixelSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// The color at `(x, y)`. Callers guarantee the point is in bounds.
    fn pixel(&self, x: u32, y: u32) -> Srgb;

    /// True when `p` lies inside the image.
    #[inline]
    fn contains(&self, p: Point) -> bool {
        Rect::new(0, 0, self.width(), self.height()).contains(p)
    }

    /// All pixels of `rect` in row-major order.
    ///
    /// The rectangle is clipped to the image first; the part outside
    /// contributes nothing.
    fn pixels_in(&self, rect: Rect) -> Vec<Srgb> {
        let rect = rect.clip_to(self.width(), self.height());
        let mut out = Vec::with_capacity(rect.area() as usize);
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                out.push(self.pixel(x, y));
            }
        }
        out
    }
}

/// An owned, row-major sRGB image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Srgb>,
}

impl PixelBuffer {
    /// Wrap row-major pixels. Returns `None` when the length does not match
    /// `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Srgb>) -> Option<Self> {
        if pixels.len() as u64 != width as u64 * height as u64 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer filled with one color.
    pub fn filled(width: u32, height: u32, color: Srgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build from packed 8-bit RGB bytes (3 per pixel).
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() as u64 != width as u64 * height as u64 * 3 {
            return None;
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Srgb::new(c[0], c[1], c[2]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Overwrite every pixel inside `rect` (clipped) with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Srgb) {
        let rect = rect.clip_to(self.width, self.height);
        for y in rect.y..rect.y + rect.height {
            let row = y as usize * self.width as usize;
            for x in rect.x..rect.x + rect.width {
                self.pixels[row + x as usize] = color;
            }
        }
    }

    /// Overwrite a single pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Srgb) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.pixels[idx] = color;
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Packed 8-bit RGB bytes, 3 per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }
}

impl PixelSource for PixelBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Srgb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(PixelBuffer::new(2, 2, vec![Srgb::new(0, 0, 0); 3]).is_none());
        assert!(PixelBuffer::new(2, 2, vec![Srgb::new(0, 0, 0); 4]).is_some());
    }

    #[test]
    fn test_from_rgb_bytes_row_major() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let buf = PixelBuffer::from_rgb_bytes(2, 2, &bytes).unwrap();
        assert_eq!(buf.pixel(1, 0), Srgb::new(4, 5, 6));
        assert_eq!(buf.pixel(0, 1), Srgb::new(7, 8, 9));
        assert_eq!(buf.to_rgb_bytes(), bytes.to_vec());
        assert!(PixelBuffer::from_rgb_bytes(2, 2, &bytes[..11]).is_none());
    }

    #[test]
    fn test_pixels_in_clips_to_image() {
        let mut buf = PixelBuffer::filled(4, 4, Srgb::new(0, 0, 0));
        buf.set_pixel(3, 3, Srgb::new(9, 9, 9));

        let px = buf.pixels_in(Rect::new(2, 2, 10, 10));
        assert_eq!(px.len(), 4);
        assert_eq!(px[3], Srgb::new(9, 9, 9));

        assert!(buf.pixels_in(Rect::new(8, 8, 2, 2)).is_empty());
    }

    #[test]
    fn test_fill_rect() {
        let mut buf = PixelBuffer::filled(3, 3, Srgb::new(0, 0, 0));
        buf.fill_rect(Rect::new(1, 1, 5, 5), Srgb::new(1, 1, 1));
        assert_eq!(buf.pixel(0, 0), Srgb::new(0, 0, 0));
        assert_eq!(buf.pixel(2, 2), Srgb::new(1, 1, 1));
        assert_eq!(buf.pixels().iter().filter(|c| c.r == 1).count(), 4);
    }

    #[test]
    fn test_contains() {
        let buf = PixelBuffer::filled(3, 2, Srgb::new(0, 0, 0));
        assert!(buf.contains(Point::new(2, 1)));
        assert!(!buf.contains(Point::new(3, 1)));
        assert!(!buf.contains(Point::new(0, 2)));
        assert!(!buf.contains(Point::new(u32::MAX, u32::MAX)));
    }
}
