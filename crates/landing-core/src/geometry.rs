#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixels.

use serde::{Deserialize, Serialize};

/// A client-space rectangle, as reported by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    /// Left edge (inclusive).
    pub left: f64,
    /// Top edge (inclusive).
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ClientRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Length of the longer side.
    #[inline]
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Vertical extent of a page section in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VerticalSpan {
    /// Offset of the section top from the document top.
    pub top: f64,
    /// Section height.
    pub height: f64,
}

impl VerticalSpan {
    /// Create a new span.
    #[inline]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `y` lies in `[top, bottom)`.
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_half_open() {
        let span = VerticalSpan::new(100.0, 50.0);
        assert!(span.contains(100.0));
        assert!(span.contains(149.9));
        assert!(!span.contains(150.0));
        assert!(!span.contains(99.9));
    }

    #[test]
    fn zero_height_span_contains_nothing() {
        let span = VerticalSpan::new(10.0, 0.0);
        assert!(!span.contains(10.0));
    }

    #[test]
    fn max_side_picks_longer_edge() {
        assert_eq!(ClientRect::new(0.0, 0.0, 120.0, 40.0).max_side(), 120.0);
        assert_eq!(ClientRect::new(0.0, 0.0, 20.0, 40.0).max_side(), 40.0);
    }
}
