//! Enter/exit transitions for the content node.
//!
//! Content mounts lazily on the first enter and unmounts once an exit has
//! run its full duration. The controller owns the timing; a transition only
//! styles nodes and reports how long its exit takes.

use core::time::Duration;
use popover_dom::{Document, ElementId};

/// How the content node appears and disappears.
pub trait Transition {
    /// Show the content, creating the node inside `container` when `node`
    /// is `None`. Returns the visible node.
    fn enter(&self, document: &dyn Document, container: ElementId, node: Option<ElementId>) -> Option<ElementId>;

    /// Start hiding `node`. Returns how long to wait before unmounting it.
    fn exit(&self, document: &dyn Document, node: ElementId) -> Duration;

    /// Remove `node` from `container`.
    fn unmount(&self, document: &dyn Document, container: ElementId, node: ElementId) {
        if document.contains(container, node) {
            document.remove_child(container, node);
        }
    }
}

/// Opacity fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    duration: Duration,
}

impl Fade {
    /// A fade taking `duration` each way.
    #[inline]
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Length of one fade.
    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl Transition for Fade {
    fn enter(&self, document: &dyn Document, container: ElementId, node: Option<ElementId>) -> Option<ElementId> {
        let visible = match node {
            Some(existing) => existing,
            None => {
                let created = document.create_element("div")?;
                document.set_style(
                    created,
                    "transition",
                    &format!("opacity {}ms", self.duration.as_millis()),
                );
                document.append_child(container, created);
                created
            }
        };
        document.set_style(visible, "opacity", "1");
        Some(visible)
    }

    fn exit(&self, document: &dyn Document, node: ElementId) -> Duration {
        document.set_style(node, "opacity", "0");
        self.duration
    }
}
