//! Per-axis alignment of a panel against its trigger.
//!
//! Each function computes the near-edge coordinate (`left` on the horizontal
//! axis, `top` on the vertical one) of the panel. They differ only in which
//! edge of the panel meets which edge of the trigger:
//!
//! ```text
//!            trigger
//!           |-------|
//! before  [pp]
//! start     [pp]
//! center     [pp]
//! end          [pp]
//! after           [pp]
//! ```

use crate::{Axis, Frame, Rect, page_offset};

/// Coordinate for a single anchor property (`left` or `top`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOffset {
    /// Axis the value applies to.
    pub axis: Axis,
    /// Near-edge coordinate of the panel.
    pub value: f64,
}

impl AxisOffset {
    #[inline]
    const fn new(axis: Axis, value: f64) -> Self {
        Self { axis, value }
    }

    /// CSS property this offset is written to.
    #[inline]
    #[must_use]
    pub const fn property(&self) -> &'static str {
        self.axis.near_property()
    }
}

#[inline]
fn trigger_origin(axis: Axis, frame: &Frame, trigger: &Rect) -> f64 {
    axis.coordinate(&page_offset(trigger, frame))
}

/// Panel ends where the trigger begins.
#[must_use]
pub fn before(axis: Axis, frame: &Frame, trigger: &Rect, popover: &Rect, offset: f64) -> AxisOffset {
    AxisOffset::new(axis, trigger_origin(axis, frame, trigger) - axis.size(popover) + offset)
}

/// Panel starts where the trigger starts.
#[must_use]
pub fn start(axis: Axis, frame: &Frame, trigger: &Rect, _popover: &Rect, offset: f64) -> AxisOffset {
    AxisOffset::new(axis, trigger_origin(axis, frame, trigger) + offset)
}

/// Panel and trigger share the same center.
#[must_use]
pub fn center(axis: Axis, frame: &Frame, trigger: &Rect, popover: &Rect, offset: f64) -> AxisOffset {
    AxisOffset::new(
        axis,
        trigger_origin(axis, frame, trigger) + axis.size(trigger) / 2.0 - axis.size(popover) / 2.0 + offset,
    )
}

/// Panel ends where the trigger ends.
#[must_use]
pub fn end(axis: Axis, frame: &Frame, trigger: &Rect, popover: &Rect, offset: f64) -> AxisOffset {
    AxisOffset::new(
        axis,
        trigger_origin(axis, frame, trigger) + axis.size(trigger) - axis.size(popover) + offset,
    )
}

/// Panel starts where the trigger ends.
#[must_use]
pub fn after(axis: Axis, frame: &Frame, trigger: &Rect, _popover: &Rect, offset: f64) -> AxisOffset {
    AxisOffset::new(axis, trigger_origin(axis, frame, trigger) + axis.size(trigger) + offset)
}

/// The five alignments of the placement vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    /// See [`before`].
    Before,
    /// See [`start`].
    Start,
    /// See [`center`].
    Center,
    /// See [`end`].
    End,
    /// See [`after`].
    After,
}

impl Align {
    /// Every alignment, in visual order along the axis.
    pub const ALL: [Self; 5] = [Self::Before, Self::Start, Self::Center, Self::End, Self::After];

    /// Run the placement function for this alignment.
    #[inline]
    #[must_use]
    pub fn place(self, axis: Axis, frame: &Frame, trigger: &Rect, popover: &Rect, offset: f64) -> AxisOffset {
        let place_fn = match self {
            Self::Before => before,
            Self::Start => start,
            Self::Center => center,
            Self::End => end,
            Self::After => after,
        };
        place_fn(axis, frame, trigger, popover, offset)
    }

    /// Placement token for this alignment.
    #[inline]
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::After => "after",
        }
    }

    /// Parse a placement token.
    #[inline]
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|align| align.token() == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AxisOrigin;

    const TRIGGER: Rect = Rect::new(100.0, 50.0, 40.0, 20.0);
    const POPOVER: Rect = Rect::sized(200.0, 80.0);

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    fn window() -> Frame {
        Frame::window(1024.0, 768.0)
    }

    #[test]
    fn horizontal_alignments() {
        let frame = window();
        let axis = Axis::Horizontal;
        assert_close(before(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, -150.0);
        assert_close(start(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, 50.0);
        assert_close(center(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, -30.0);
        assert_close(end(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, -110.0);
        assert_close(after(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, 90.0);
    }

    #[test]
    fn vertical_alignments() {
        let frame = window();
        let axis = Axis::Vertical;
        assert_close(before(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, 20.0);
        assert_close(start(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, 100.0);
        assert_close(center(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, 70.0);
        assert_close(end(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, 40.0);
        assert_close(after(axis, &frame, &TRIGGER, &POPOVER, 0.0).value, 120.0);
    }

    #[test]
    fn before_and_after_are_adjacent() {
        let triggers = [TRIGGER, Rect::new(-12.5, 640.0, 3.0, 77.0), Rect::new(0.0, 0.0, 0.0, 0.0)];
        let popovers = [POPOVER, Rect::sized(1.5, 999.0), Rect::sized(0.0, 0.0)];
        for trigger in &triggers {
            for popover in &popovers {
                for axis in Axis::BOTH {
                    let frame = window();
                    let gap = after(axis, &frame, trigger, popover, 7.0).value
                        - before(axis, &frame, trigger, popover, 7.0).value;
                    assert_close(gap, axis.size(trigger) + axis.size(popover));
                }
            }
        }
    }

    #[test]
    fn center_is_exact_midpoint() {
        let trigger = Rect::new(33.3, 17.7, 41.1, 9.9);
        let popover = Rect::sized(120.25, 64.75);
        let frame = window();
        for axis in Axis::BOTH {
            let origin = axis.coordinate(&trigger.origin());
            let expected = origin + (axis.size(&trigger) - axis.size(&popover)) / 2.0;
            assert_close(center(axis, &frame, &trigger, &popover, 0.0).value, expected);
        }
    }

    #[test]
    fn offset_is_added_last() {
        let frame = window();
        for align in Align::ALL {
            let base = align.place(Axis::Horizontal, &frame, &TRIGGER, &POPOVER, 0.0).value;
            let shifted = align.place(Axis::Horizontal, &frame, &TRIGGER, &POPOVER, -4.0).value;
            assert_close(shifted - base, -4.0);
        }
    }

    #[test]
    fn body_origin_shifts_every_alignment() {
        let body = Rect::new(-250.0, 0.0, 1024.0, 3000.0);
        let frame = Frame::new(AxisOrigin::Body, body, 1024.0, 768.0);
        for align in Align::ALL {
            let viewport = align.place(Axis::Vertical, &window(), &TRIGGER, &POPOVER, 0.0).value;
            let document = align.place(Axis::Vertical, &frame, &TRIGGER, &POPOVER, 0.0).value;
            assert_close(document - viewport, 250.0);
        }
    }

    #[test]
    fn tokens_round_trip() {
        for align in Align::ALL {
            assert_eq!(Align::from_token(align.token()), Some(align));
        }
        assert_eq!(Align::from_token("middle"), None);
    }

    #[test]
    fn offset_property_matches_axis() {
        let frame = window();
        assert_eq!(start(Axis::Horizontal, &frame, &TRIGGER, &POPOVER, 0.0).property(), "left");
        assert_eq!(start(Axis::Vertical, &frame, &TRIGGER, &POPOVER, 0.0).property(), "top");
    }
}
