//! Popovers anchored to trigger elements.
//!
//! [`Popover`] ties the pieces together: it locks document scrolling while
//! open, resolves the panel position from the configured placement, keeps it
//! up to date on resize and closes on click-away. The document, window
//! listeners and event loop it runs against come from a
//! [`Host`](popover_dom::Host).

mod config;
mod options;
mod popover;
mod portal;
mod transition;

pub use config::{DEFAULT_PADDING_SELECTORS, DEFAULT_TRANSITION_MS, DEFAULT_Z_INDEX, PopoverConfig};
pub use options::{ChangeHandler, ClickAwayHandler, CloseHandler, PopoverOptions, PopoverProps, RenderHandler};
pub use popover::Popover;
pub use portal::{BodyPortal, Portal};
pub use transition::{Fade, Transition};

pub use popover_dom::{Event, EventKind, Host};
pub use popover_placement::{Placement, Style, Vocabulary};
