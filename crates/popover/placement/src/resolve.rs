use crate::{Edge, Horizontal, Placement, Position, Style, Vertical};
use popover_geometry::{Axis, Frame, Rect};

/// Compute the panel style for `placement`.
///
/// `trigger` is the anchor's bounding rect and `popover` the panel's, both in
/// viewport coordinates. The frame decides whether offsets are viewport or
/// body relative and, with it, the CSS position. Pure: nothing is read from
/// or written to the document.
#[must_use]
pub fn resolve(
    placement: Placement,
    frame: &Frame,
    trigger: &Rect,
    popover: &Rect,
    offset_x: f64,
    offset_y: f64,
) -> Style {
    let horizontal = placement
        .x
        .place(Axis::Horizontal, frame, trigger, popover, offset_x);
    let vertical = placement
        .y
        .place(Axis::Vertical, frame, trigger, popover, offset_y);

    Style {
        position: Position::for_origin(frame.origin),
        horizontal: Some(match placement.x.edge {
            Edge::Near => Horizontal::Left(horizontal),
            Edge::Far => Horizontal::Right(horizontal),
        }),
        vertical: Some(match placement.y.edge {
            Edge::Near => Vertical::Top(vertical),
            Edge::Far => Vertical::Bottom(vertical),
        }),
    }
}
