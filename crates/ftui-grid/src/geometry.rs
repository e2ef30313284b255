#![forbid(unsafe_code)]

//! Sub-cell geometry for grid layout.
//!
//! Grid sizing works in fractional units (pixels or cells scaled by the
//! host), so these types carry `f64` rather than the `u16` cell coordinates
//! used by the render kernel.

use serde::{Deserialize, Serialize};

/// Width and height of an area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub width: f64,
    pub height: f64,
}

impl GridSize {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle: top-left offset plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GridRect {
    /// Create a new rectangle.
    ///
    /// Negative extents are clamped to zero so degenerate layouts collapse
    /// instead of producing inverted rectangles.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle anchored at the origin.
    #[inline]
    pub fn from_size(size: GridSize) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Size of the rectangle.
    #[inline]
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the interiors of two rectangles overlap.
    pub fn overlaps(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
