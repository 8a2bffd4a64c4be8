//! Rendering popover content outside the trigger's subtree.

use popover_dom::{Document, ElementId};

/// Owns the node popover content is mounted into.
pub trait Portal {
    /// Create and attach the container if not already attached. Idempotent.
    fn mount(&mut self, document: &dyn Document) -> Option<ElementId>;

    /// The attached container, if any.
    fn container(&self) -> Option<ElementId>;

    /// Remove the container. A container that is already gone is ignored.
    fn detach(&mut self, document: &dyn Document);
}

/// A stacking container appended to the document body.
#[derive(Debug)]
pub struct BodyPortal {
    z_index: i32,
    node: Option<ElementId>,
}

impl BodyPortal {
    /// A portal whose container stacks at `z_index`.
    #[inline]
    #[must_use]
    pub const fn new(z_index: i32) -> Self {
        Self { z_index, node: None }
    }
}

impl Portal for BodyPortal {
    fn mount(&mut self, document: &dyn Document) -> Option<ElementId> {
        if self.node.is_some() {
            return self.node;
        }
        let body = document.body()?;
        let node = document.create_element("div")?;
        document.set_style(node, "position", "absolute");
        document.set_style(node, "z-index", &self.z_index.to_string());
        document.set_style(node, "width", "100%");
        document.set_style(node, "top", "0px");
        document.append_child(body, node);
        log::trace!(target: "popover", "mounted portal container {node:?}");
        self.node = Some(node);
        self.node
    }

    fn container(&self) -> Option<ElementId> {
        self.node
    }

    fn detach(&mut self, document: &dyn Document) {
        let Some(node) = self.node.take() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        if document.contains(body, node) {
            document.remove_child(body, node);
        }
    }
}
