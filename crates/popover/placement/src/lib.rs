//! Placement resolution: from a placement token and two measured rects to the
//! inline style that anchors a panel next to its trigger.
//!
//! Two token vocabularies are accepted and mapped onto one axis model:
//! - the full one, `<x>-<y>` with both halves from
//!   `before | start | center | end | after` (`start-after`, `center-before`)
//! - the compact one, `<x>-<y>` with `start | center | end` horizontally and
//!   `top | center | bottom` vertically (`end-bottom`, `center-top`)
//!
//! The compact vocabulary anchors some placements from the far edge of the
//! frame (`right`/`bottom`) so the panel stays put if its own size changes.

mod placement;
mod resolve;
mod style;

pub use placement::{AxisPlacement, COMPACT_BOTTOM_GAP, Edge, Placement, Vocabulary};
pub use resolve::resolve;
pub use style::{Horizontal, Position, Style, Vertical};
