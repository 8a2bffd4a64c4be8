use serde::{Deserialize, Serialize};

/// Bounding box of an element in viewport coordinates (CSS pixels).
///
/// Mirrors what `getBoundingClientRect()` reports. A `Rect` is a snapshot: it
/// is measured right before a placement pass and never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Distance from the top of the viewport.
    pub top: f64,
    /// Distance from the left of the viewport.
    pub left: f64,
    /// Border box width.
    pub width: f64,
    /// Border box height.
    pub height: f64,
}

impl Rect {
    /// Create a rect from its origin and size.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Create a rect of the given size anchored at the viewport origin.
    #[inline]
    #[must_use]
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (`left + width`).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Origin of the rect as a point.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point {
            top: self.top,
            left: self.left,
        }
    }
}

/// A `{top, left}` pair, typically a rect origin after frame correction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Vertical coordinate.
    pub top: f64,
    /// Horizontal coordinate.
    pub left: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_edges() {
        let rect = Rect::new(100.0, 50.0, 40.0, 20.0);
        assert!((rect.right() - 90.0).abs() < f64::EPSILON);
        assert!((rect.bottom() - 120.0).abs() < f64::EPSILON);
        assert_eq!(
            rect.origin(),
            Point {
                top: 100.0,
                left: 50.0
            }
        );
    }

    #[test]
    fn sized_rect_sits_at_origin() {
        let rect = Rect::sized(200.0, 80.0);
        assert_eq!(rect.origin(), Point::default());
        assert!((rect.right() - 200.0).abs() < f64::EPSILON);
    }
}
