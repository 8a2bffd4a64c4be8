//! In-memory document with a deterministic, hand-driven layout.
//!
//! There is no style engine: element boxes are whatever the embedder sets with
//! [`HeadlessDocument::set_rect`], except where inline styles say otherwise
//! (`width`/`height` in px, `overflow: scroll`, `padding-right`). The document
//! itself models one thing browsers do that matters for scroll locking: the
//! root shows a vertical scrollbar when the content is taller than the
//! viewport and the body is not `overflow: hidden`.
//!
//! Removing an element drops it and its subtree from the arena, so handles to
//! removed elements stop resolving and measure as zero. Detached elements that
//! were never removed, such as freshly created ones, stay alive.

use crate::document::{Document, ElementId};
use core::cell::RefCell;
use indextree::{Arena, Node, NodeId};
use popover_geometry::Rect;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug)]
struct Element {
    handle: ElementId,
    tag: String,
    id_attr: Option<String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    rect: Rect,
    scroll_height: f64,
}

impl Element {
    fn new(handle: ElementId, tag: &str) -> Self {
        Self {
            handle,
            tag: tag.to_ascii_lowercase(),
            id_attr: None,
            classes: Vec::new(),
            style: BTreeMap::new(),
            rect: Rect::default(),
            scroll_height: 0.0,
        }
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|candidate| candidate == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.id_attr.as_deref() == Some(id)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }

    fn style_px(&self, property: &str) -> Option<f64> {
        self.style.get(property).and_then(|value| parse_px(value))
    }

    fn scrolls(&self) -> bool {
        self.style.get("overflow").is_some_and(|value| value == "scroll")
    }

    fn offset_width(&self) -> f64 {
        self.style_px("width").unwrap_or(self.rect.width)
    }

    fn offset_height(&self) -> f64 {
        self.style_px("height").unwrap_or(self.rect.height)
    }
}

/// Parse a CSS pixel length such as `"15px"`.
fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse::<f64>().ok()
}

#[derive(Debug)]
struct Tree {
    arena: Arena<Element>,
    handles: HashMap<ElementId, NodeId>,
    next_handle: u64,
    root: NodeId,
    body: NodeId,
    viewport_width: f64,
    viewport_height: f64,
    scrollbar_width: f64,
    content_height: f64,
}

impl Tree {
    fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let mut arena = Arena::new();
        let mut handles = HashMap::new();
        let root_handle = ElementId::new(0);
        let body_handle = ElementId::new(1);
        let root = arena.new_node(Element::new(root_handle, "html"));
        let body = arena.new_node(Element::new(body_handle, "body"));
        handles.insert(root_handle, root);
        handles.insert(body_handle, body);
        if let Err(err) = root.checked_append(body, &mut arena) {
            log::error!(target: "popover::dom", "failed to attach headless body: {err}");
        }
        let mut tree = Self {
            arena,
            handles,
            next_handle: 2,
            root,
            body,
            viewport_width,
            viewport_height,
            scrollbar_width: 0.0,
            content_height: viewport_height,
        };
        tree.sync_root_boxes();
        tree
    }

    fn insert(&mut self, tag: &str) -> NodeId {
        let handle = ElementId::new(self.next_handle);
        self.next_handle += 1;
        let node = self.arena.new_node(Element::new(handle, tag));
        self.handles.insert(handle, node);
        node
    }

    /// Drop `node` and its subtree, forgetting their handles.
    fn discard(&mut self, node: NodeId) {
        let handles: Vec<ElementId> = node
            .descendants(&self.arena)
            .map(|descendant| self.handle_of(descendant))
            .collect();
        for handle in &handles {
            self.handles.remove(handle);
        }
        node.remove_subtree(&mut self.arena);
    }

    fn node(&self, handle: ElementId) -> Option<NodeId> {
        self.handles.get(&handle).copied()
    }

    fn element(&self, handle: ElementId) -> Option<&Element> {
        let node = self.node(handle)?;
        self.arena.get(node).map(Node::get)
    }

    fn element_mut(&mut self, handle: ElementId) -> Option<&mut Element> {
        let node = self.node(handle)?;
        self.arena.get_mut(node).map(Node::get_mut)
    }

    fn handle_of(&self, node: NodeId) -> ElementId {
        self.arena[node].get().handle
    }

    fn root_handle(&self) -> ElementId {
        self.handle_of(self.root)
    }

    fn body_handle(&self) -> ElementId {
        self.handle_of(self.body)
    }

    fn overflow_hidden(&self, node: NodeId) -> bool {
        self.arena[node]
            .get()
            .style
            .get("overflow")
            .is_some_and(|value| value == "hidden")
    }

    /// Whether the viewport currently shows a vertical scrollbar.
    fn shows_scrollbar(&self) -> bool {
        self.content_height > self.viewport_height
            && !self.overflow_hidden(self.body)
            && !self.overflow_hidden(self.root)
    }

    fn scrollbar_gutter(&self) -> f64 {
        if self.shows_scrollbar() {
            self.scrollbar_width
        } else {
            0.0
        }
    }

    /// Keep the root and body boxes in step with the viewport and content.
    fn sync_root_boxes(&mut self) {
        let width = self.viewport_width;
        let viewport_height = self.viewport_height;
        let content_height = self.content_height.max(viewport_height);
        let root = self.root;
        let body = self.body;
        let scroll_top = self.arena[body].get().rect.top;
        let root_element = self.arena[root].get_mut();
        root_element.rect = Rect::new(scroll_top, 0.0, width, content_height);
        root_element.scroll_height = content_height;
        let body_element = self.arena[body].get_mut();
        body_element.rect = Rect::new(scroll_top, 0.0, width, content_height);
        body_element.scroll_height = content_height;
    }
}

/// An in-memory [`Document`] backed by an `indextree` arena.
#[derive(Debug)]
pub struct HeadlessDocument {
    tree: RefCell<Tree>,
}

impl HeadlessDocument {
    /// Create a document with an `<html>` root and a `<body>` filling the viewport.
    #[must_use]
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            tree: RefCell::new(Tree::new(viewport_width, viewport_height)),
        }
    }

    /// Set the width classic (non-overlay) scrollbars take up.
    #[must_use]
    pub fn with_scrollbar_width(mut self, width: f64) -> Self {
        self.tree.get_mut().scrollbar_width = width;
        self
    }

    /// Width classic scrollbars take up in this document.
    #[must_use]
    pub fn scrollbar_width(&self) -> f64 {
        self.tree.borrow().scrollbar_width
    }

    /// Resize the viewport.
    pub fn set_viewport(&self, width: f64, height: f64) {
        let mut tree = self.tree.borrow_mut();
        tree.viewport_width = width;
        tree.viewport_height = height;
        tree.sync_root_boxes();
    }

    /// Set the height of the laid out document content.
    ///
    /// Content taller than the viewport makes the document overflow.
    pub fn set_content_height(&self, height: f64) {
        let mut tree = self.tree.borrow_mut();
        tree.content_height = height;
        tree.sync_root_boxes();
    }

    /// Scroll the document so that `top` is at the top of the viewport.
    ///
    /// Only the root and body boxes move; other element rects are the
    /// embedder's responsibility.
    pub fn scroll_to(&self, top: f64) {
        let mut tree = self.tree.borrow_mut();
        let body = tree.body;
        tree.arena[body].get_mut().rect.top = -top;
        tree.sync_root_boxes();
    }

    /// Create a detached element carrying `class`.
    #[must_use]
    pub fn create_element_with_class(&self, tag: &str, class: &str) -> ElementId {
        let mut tree = self.tree.borrow_mut();
        let node = tree.insert(tag);
        let element = tree.arena[node].get_mut();
        element.classes.push(class.to_owned());
        element.handle
    }

    /// Add a class to an element.
    pub fn add_class(&self, element: ElementId, class: &str) {
        if let Some(target) = self.tree.borrow_mut().element_mut(element) {
            target.classes.push(class.to_owned());
        }
    }

    /// Set the `id` attribute of an element.
    pub fn set_id(&self, element: ElementId, id: &str) {
        if let Some(target) = self.tree.borrow_mut().element_mut(element) {
            target.id_attr = Some(id.to_owned());
        }
    }

    /// Set the layout box of an element.
    pub fn set_rect(&self, element: ElementId, rect: Rect) {
        if let Some(target) = self.tree.borrow_mut().element_mut(element) {
            target.rect = rect;
        }
    }

    /// Set the scrollable content height of an element.
    pub fn set_scroll_height(&self, element: ElementId, height: f64) {
        if let Some(target) = self.tree.borrow_mut().element_mut(element) {
            target.scroll_height = height;
        }
    }

    /// Whether `element` is connected to the document root.
    #[must_use]
    pub fn is_attached(&self, element: ElementId) -> bool {
        let root = self.tree.borrow().root_handle();
        self.contains(root, element)
    }

    /// Children of `element` in order.
    #[must_use]
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        let tree = self.tree.borrow();
        let Some(node) = tree.node(element) else {
            return Vec::new();
        };
        node.children(&tree.arena)
            .map(|child| tree.handle_of(child))
            .collect()
    }

    /// Number of live elements, root and body included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.tree.borrow().handles.len()
    }

    /// Append a freshly created element to the body and return it.
    #[must_use]
    pub fn append_to_body(&self, tag: &str) -> ElementId {
        let (body, child) = {
            let mut tree = self.tree.borrow_mut();
            let node = tree.insert(tag);
            (tree.body_handle(), tree.handle_of(node))
        };
        self.append_child(body, child);
        child
    }
}

impl Document for HeadlessDocument {
    fn body(&self) -> Option<ElementId> {
        Some(self.tree.borrow().body_handle())
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.tree.borrow().root_handle())
    }

    fn create_element(&self, tag: &str) -> Option<ElementId> {
        let mut tree = self.tree.borrow_mut();
        let node = tree.insert(tag);
        Some(tree.handle_of(node))
    }

    fn append_child(&self, parent: ElementId, child: ElementId) {
        let mut tree = self.tree.borrow_mut();
        let (Some(parent_node), Some(child_node)) = (tree.node(parent), tree.node(child)) else {
            return;
        };
        child_node.detach(&mut tree.arena);
        if let Err(err) = parent_node.checked_append(child_node, &mut tree.arena) {
            log::warn!(target: "popover::dom", "cannot append {child:?} to {parent:?}: {err}");
        }
    }

    fn remove_child(&self, parent: ElementId, child: ElementId) {
        let mut tree = self.tree.borrow_mut();
        let (Some(parent_node), Some(child_node)) = (tree.node(parent), tree.node(child)) else {
            return;
        };
        if tree.arena[child_node].parent() == Some(parent_node) {
            tree.discard(child_node);
        }
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let tree = self.tree.borrow();
        let (Some(ancestor_node), Some(start)) = (tree.node(ancestor), tree.node(node)) else {
            return false;
        };
        start
            .ancestors(&tree.arena)
            .any(|candidate| candidate == ancestor_node)
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let tree = self.tree.borrow();
        tree.root
            .descendants(&tree.arena)
            .map(|node| tree.arena[node].get())
            .find(|element| element.matches(selector))
            .map(|element| element.handle)
    }

    fn bounding_client_rect(&self, element: ElementId) -> Rect {
        let tree = self.tree.borrow();
        tree.element(element).map_or_else(Rect::default, |target| {
            Rect {
                width: target.offset_width(),
                height: target.offset_height(),
                ..target.rect
            }
        })
    }

    fn offset_width(&self, element: ElementId) -> f64 {
        let tree = self.tree.borrow();
        tree.element(element)
            .map_or(0.0, Element::offset_width)
    }

    fn client_width(&self, element: ElementId) -> f64 {
        let tree = self.tree.borrow();
        if element == tree.root_handle() {
            return tree.viewport_width - tree.scrollbar_gutter();
        }
        tree.element(element).map_or(0.0, |target| {
            let gutter = if target.scrolls() { tree.scrollbar_width } else { 0.0 };
            (target.offset_width() - gutter).max(0.0)
        })
    }

    fn client_height(&self, element: ElementId) -> f64 {
        let tree = self.tree.borrow();
        if element == tree.root_handle() {
            return tree.viewport_height;
        }
        tree.element(element).map_or(0.0, |target| {
            let gutter = if target.scrolls() { tree.scrollbar_width } else { 0.0 };
            (target.offset_height() - gutter).max(0.0)
        })
    }

    fn scroll_height(&self, element: ElementId) -> f64 {
        let tree = self.tree.borrow();
        tree.element(element).map_or(0.0, |target| {
            target.scroll_height.max(target.offset_height())
        })
    }

    fn inner_width(&self) -> f64 {
        self.tree.borrow().viewport_width
    }

    fn inner_height(&self) -> f64 {
        self.tree.borrow().viewport_height
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        if let Some(target) = self.tree.borrow_mut().element_mut(element) {
            target.style.insert(property.to_owned(), value.to_owned());
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .element(element)
            .and_then(|target| target.style.get(property).cloned())
    }

    fn remove_style(&self, element: ElementId, property: &str) {
        if let Some(target) = self.tree.borrow_mut().element_mut(element) {
            target.style.remove(property);
        }
    }

    fn computed_padding_right(&self, element: ElementId) -> f64 {
        self.tree
            .borrow()
            .element(element)
            .and_then(|target| target.style_px("padding-right"))
            .unwrap_or(0.0)
    }
}
