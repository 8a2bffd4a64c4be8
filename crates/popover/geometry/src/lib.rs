//! Geometry primitives for anchoring a floating panel to a trigger element.
//!
//! Everything in this crate is pure arithmetic over already measured
//! rectangles:
//! - `Rect`/`Point`: bounding box snapshots in viewport coordinates
//! - `Frame`: the coordinate frame (viewport or document body) offsets are
//!   measured in, see [`page_offset`]
//! - `Align`: the five per-axis alignments and their placement functions

mod align;
mod axis;
mod rect;

pub use align::{Align, AxisOffset, after, before, center, end, start};
pub use axis::{Axis, AxisOrigin, Frame, page_offset};
pub use rect::{Point, Rect};
