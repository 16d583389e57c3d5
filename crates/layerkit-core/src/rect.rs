//! Pixel rectangles.
//!
//! [`Rect`] is returned by the mask searches (bounding and inscribed
//! rectangles) and consumed by crop and drawing operations.
//!
//! # Coordinate System
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Rect   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// # Example
///
/// ```rust
/// use layerkit_core::Rect;
///
/// let rect = Rect::new(10, 20, 100, 50);
/// assert_eq!(rect.right(), 110);
/// assert_eq!(rect.bottom(), 70);
/// assert_eq!(rect.area(), 5000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rectangle spanning two corner points, in any order.
    ///
    /// The size is the coordinate difference, so two equal points give an
    /// empty rectangle.
    ///
    /// ```rust
    /// use layerkit_core::Rect;
    ///
    /// let rect = Rect::from_corners(110, 20, 10, 70);
    /// assert_eq!(rect, Rect::new(10, 20, 100, 50));
    /// ```
    #[inline]
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        let (min_x, max_x) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (min_y, max_y) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point is inside (left/top inclusive).
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns `true` if this rectangle fully contains another.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Intersection with another rectangle, `None` if they don't overlap.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let rect = Rect::new(10, 10, 100, 100);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(109, 109));
        assert!(!rect.contains(110, 110));
        assert!(rect.contains_rect(&Rect::new(20, 20, 10, 10)));
    }

    #[test]
    fn test_from_corners_empty() {
        let rect = Rect::from_corners(5, 5, 5, 9);
        assert!(rect.is_empty());
        assert_eq!(rect.height, 4);
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
        assert_eq!(a.intersect(&Rect::new(200, 0, 5, 5)), None);
    }
}
