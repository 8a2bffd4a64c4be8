//! Host environment seen by the popover engine.
//!
//! The engine never talks to a browser directly. It goes through:
//! - [`Document`]: element tree, layout measurements and inline styles
//! - [`Window`]: `click`/`resize` listeners on the window and on elements
//! - [`EventLoop`]: the single-threaded task queue used for next-tick work
//!
//! [`HeadlessDocument`] is an in-memory document used by tests and non-browser
//! embedders; [`DetachedDocument`] stands in when no document exists at all.

mod document;
mod event_loop;
mod events;
mod headless;
mod host;

pub use document::{DetachedDocument, Document, ElementId};
pub use event_loop::EventLoop;
pub use events::{Event, EventKind, Listener, ListenerId, Window};
pub use headless::HeadlessDocument;
pub use host::Host;
