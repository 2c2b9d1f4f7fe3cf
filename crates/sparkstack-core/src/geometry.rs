#![forbid(unsafe_code)]

//! Cell-grid rectangles and margins.
//!
//! Coordinates start at the top-left corner of the screen. Edge arithmetic
//! saturates at `u16::MAX`, so a rect parked near the far corner simply
//! stops at the edge of the coordinate space.

/// An axis-aligned region of the cell grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// First column covered.
    pub x: u16,
    /// First row covered.
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width` x `height` region anchored at (0, 0).
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// One past the last covered column.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last covered row.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// True when the region covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// The region covered by both `self` and `other`.
    ///
    /// Disjoint inputs give `Rect::default()`.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let width = self.right().min(other.right()).saturating_sub(left);
        let height = self.bottom().min(other.bottom()).saturating_sub(top);
        if width == 0 || height == 0 {
            return Rect::default();
        }
        Rect::new(left, top, width, height)
    }

    /// The region left after carving `margin` off each edge.
    ///
    /// Oversized margins leave a zero-sized rect instead of underflowing.
    pub fn inner(&self, margin: Sides) -> Rect {
        let x = self.x.saturating_add(margin.left);
        let y = self.y.saturating_add(margin.top);
        let width = self.width.saturating_sub(margin.horizontal_sum());
        let height = self.height.saturating_sub(margin.vertical_sum());
        Rect::new(x, y, width, height)
    }
}

/// Cell counts for each edge of a rect, in CSS order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Sides {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Columns consumed by the left and right edges together.
    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.right.saturating_add(self.left)
    }

    /// Rows consumed by the top and bottom edges together.
    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.bottom.saturating_add(self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_edges_are_exclusive() {
        let frame = Rect::new(3, 1, 8, 5);
        assert_eq!((frame.right(), frame.bottom()), (11, 6));
        assert_eq!(frame.area(), 40);
    }

    #[test]
    fn far_edges_stop_at_u16_max() {
        let frame = Rect::new(65_530, 65_532, 50, 9);
        assert_eq!(frame.right(), u16::MAX);
        assert_eq!(frame.bottom(), u16::MAX);
    }

    #[test]
    fn zero_width_or_height_is_empty() {
        assert!(Rect::from_size(0, 7).is_empty());
        assert!(Rect::from_size(7, 0).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }

    #[test]
    fn intersection_of_corner_overlap() {
        let left = Rect::from_size(6, 3);
        let right = Rect::new(4, 1, 10, 10);
        assert_eq!(left.intersection(&right), Rect::new(4, 1, 2, 2));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let left = Rect::from_size(5, 5);
        let right = Rect::new(5, 0, 5, 5);
        assert!(left.intersection(&right).is_empty());
        assert_eq!(left.intersection(&right), Rect::default());
    }

    #[test]
    fn inner_removes_each_margin() {
        let frame = Rect::new(2, 2, 20, 8);
        assert_eq!(frame.inner(Sides::new(1, 3, 2, 4)), Rect::new(6, 3, 13, 5));
        assert_eq!(frame.inner(Sides::new(1, 1, 1, 1)), Rect::new(3, 3, 18, 6));
    }

    #[test]
    fn inner_of_tiny_rect_is_empty() {
        let frame = Rect::new(9, 9, 2, 1);
        assert!(frame.inner(Sides::new(1, 1, 1, 1)).is_empty());
    }

    #[test]
    fn side_sums_saturate() {
        let margin = Sides::new(u16::MAX, 1, 1, u16::MAX);
        assert_eq!(margin.horizontal_sum(), u16::MAX);
        assert_eq!(margin.vertical_sum(), u16::MAX);
    }
}
