//! Axes and coordinate frames.

use crate::{Point, Rect};
use serde::{Deserialize, Serialize};

/// One of the two layout axes a placement is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis: sized by `width`, positioned from `left`.
    Horizontal,
    /// The y axis: sized by `height`, positioned from `top`.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Size of `rect` along this axis.
    #[inline]
    #[must_use]
    pub const fn size(self, rect: &Rect) -> f64 {
        match self {
            Self::Horizontal => rect.width,
            Self::Vertical => rect.height,
        }
    }

    /// Coordinate of `point` along this axis.
    #[inline]
    #[must_use]
    pub const fn coordinate(self, point: &Point) -> f64 {
        match self {
            Self::Horizontal => point.left,
            Self::Vertical => point.top,
        }
    }

    /// CSS property anchoring the near edge (`left` or `top`).
    #[inline]
    #[must_use]
    pub const fn near_property(self) -> &'static str {
        match self {
            Self::Horizontal => "left",
            Self::Vertical => "top",
        }
    }

    /// CSS property anchoring the far edge (`right` or `bottom`).
    #[inline]
    #[must_use]
    pub const fn far_property(self) -> &'static str {
        match self {
            Self::Horizontal => "right",
            Self::Vertical => "bottom",
        }
    }
}

/// Which box offsets are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrigin {
    /// Viewport relative, used with `position: fixed`.
    #[default]
    Window,
    /// Document body relative, used with `position: absolute`.
    Body,
}

/// Snapshot of the coordinate frame a placement pass runs in.
///
/// Besides the origin it carries the body rect (needed for the body origin
/// correction) and the viewport's client size (needed to anchor a panel from
/// the far edge of the frame).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Origin offsets are reported relative to.
    pub origin: AxisOrigin,
    /// The body's bounding rect at measurement time.
    pub body: Rect,
    /// Viewport client width, excluding any vertical scrollbar.
    pub viewport_width: f64,
    /// Viewport client height.
    pub viewport_height: f64,
}

impl Frame {
    /// Create a frame snapshot.
    #[inline]
    #[must_use]
    pub const fn new(origin: AxisOrigin, body: Rect, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            origin,
            body,
            viewport_width,
            viewport_height,
        }
    }

    /// A viewport-relative frame with no body correction.
    #[inline]
    #[must_use]
    pub const fn window(viewport_width: f64, viewport_height: f64) -> Self {
        Self::new(AxisOrigin::Window, Rect::sized(viewport_width, viewport_height), viewport_width, viewport_height)
    }

    /// Extent of the containing box along `axis`.
    ///
    /// Far-edge anchors (`right`/`bottom`) are measured back from this.
    #[inline]
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> f64 {
        match (self.origin, axis) {
            (AxisOrigin::Window, Axis::Horizontal) => self.viewport_width,
            (AxisOrigin::Window, Axis::Vertical) => self.viewport_height,
            (AxisOrigin::Body, _) => axis.size(&self.body),
        }
    }
}

/// Origin of `rect` expressed in `frame`.
///
/// For the window origin this is the rect origin unchanged. For the body
/// origin the body's own top/left is subtracted, which keeps an absolutely
/// positioned panel in step with the document when the page scrolls.
#[inline]
#[must_use]
pub fn page_offset(rect: &Rect, frame: &Frame) -> Point {
    match frame.origin {
        AxisOrigin::Window => rect.origin(),
        AxisOrigin::Body => Point {
            top: rect.top - frame.body.top,
            left: rect.left - frame.body.left,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_origin_is_identity() {
        let rect = Rect::new(100.0, 50.0, 40.0, 20.0);
        let frame = Frame::new(AxisOrigin::Window, Rect::new(-300.0, -8.0, 1024.0, 4000.0), 1024.0, 768.0);
        assert_eq!(page_offset(&rect, &frame), rect.origin());
    }

    #[test]
    fn body_origin_subtracts_body_rect() {
        // Page scrolled down by 300px, body has an 8px margin.
        let body = Rect::new(-300.0, 8.0, 1008.0, 4000.0);
        let frame = Frame::new(AxisOrigin::Body, body, 1024.0, 768.0);
        let offset = page_offset(&Rect::new(100.0, 50.0, 40.0, 20.0), &frame);
        assert!((offset.top - 400.0).abs() < f64::EPSILON);
        assert!((offset.left - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn extent_follows_origin() {
        let body = Rect::new(0.0, 0.0, 1000.0, 3000.0);
        let window = Frame::new(AxisOrigin::Window, body, 1009.0, 700.0);
        let document = Frame::new(AxisOrigin::Body, body, 1009.0, 700.0);
        assert!((window.extent(Axis::Horizontal) - 1009.0).abs() < f64::EPSILON);
        assert!((window.extent(Axis::Vertical) - 700.0).abs() < f64::EPSILON);
        assert!((document.extent(Axis::Horizontal) - 1000.0).abs() < f64::EPSILON);
        assert!((document.extent(Axis::Vertical) - 3000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn axis_properties() {
        assert_eq!(Axis::Horizontal.near_property(), "left");
        assert_eq!(Axis::Horizontal.far_property(), "right");
        assert_eq!(Axis::Vertical.near_property(), "top");
        assert_eq!(Axis::Vertical.far_property(), "bottom");
    }
}
