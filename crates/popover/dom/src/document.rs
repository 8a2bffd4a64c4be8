use popover_geometry::Rect;

/// Opaque handle to an element owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw handle issued by a document.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw handle.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// The slice of the DOM the popover engine needs.
///
/// All methods take `&self`: a document is a process-wide resource shared by
/// every popover, so implementations use interior mutability. Calls naming an
/// element the document does not know about are no-ops and measure as zero.
pub trait Document {
    /// `document.body`, if a body exists.
    fn body(&self) -> Option<ElementId>;

    /// `document.documentElement`, if it exists.
    fn root(&self) -> Option<ElementId>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<ElementId>;

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere.
    fn append_child(&self, parent: ElementId, child: ElementId);

    /// Detach `child` from `parent`. Does nothing if `child` is not a child of `parent`.
    ///
    /// The document may release a removed element, so callers should not
    /// append it again.
    fn remove_child(&self, parent: ElementId, child: ElementId);

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// First attached element matching `selector` in document order.
    ///
    /// Only simple selectors are required: `.class`, `#id` and `tag`.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// `getBoundingClientRect()`.
    fn bounding_client_rect(&self, element: ElementId) -> Rect;

    /// `offsetWidth`: border box width including any scrollbar.
    fn offset_width(&self, element: ElementId) -> f64;

    /// `clientWidth`: padding box width excluding any scrollbar.
    fn client_width(&self, element: ElementId) -> f64;

    /// `clientHeight`.
    fn client_height(&self, element: ElementId) -> f64;

    /// `scrollHeight`.
    fn scroll_height(&self, element: ElementId) -> f64;

    /// `window.innerWidth`, including the vertical scrollbar.
    fn inner_width(&self) -> f64;

    /// `window.innerHeight`.
    fn inner_height(&self) -> f64;

    /// Set an inline style property.
    fn set_style(&self, element: ElementId, property: &str, value: &str);

    /// Read an inline style property.
    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Remove an inline style property.
    fn remove_style(&self, element: ElementId, property: &str);

    /// Computed `padding-right` in pixels, `0` when unset or unparsable.
    fn computed_padding_right(&self, element: ElementId) -> f64;
}

/// The document of an environment without a DOM.
///
/// Every query comes back empty and every mutation is dropped, so the engine
/// can be constructed anywhere but positions nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedDocument;

impl Document for DetachedDocument {
    fn body(&self) -> Option<ElementId> {
        None
    }

    fn root(&self) -> Option<ElementId> {
        None
    }

    fn create_element(&self, tag: &str) -> Option<ElementId> {
        log::trace!(target: "popover::dom", "no document, not creating <{tag}>");
        None
    }

    fn append_child(&self, _parent: ElementId, _child: ElementId) {}

    fn remove_child(&self, _parent: ElementId, _child: ElementId) {}

    fn contains(&self, _ancestor: ElementId, _node: ElementId) -> bool {
        false
    }

    fn query_selector(&self, _selector: &str) -> Option<ElementId> {
        None
    }

    fn bounding_client_rect(&self, _element: ElementId) -> Rect {
        Rect::default()
    }

    fn offset_width(&self, _element: ElementId) -> f64 {
        0.0
    }

    fn client_width(&self, _element: ElementId) -> f64 {
        0.0
    }

    fn client_height(&self, _element: ElementId) -> f64 {
        0.0
    }

    fn scroll_height(&self, _element: ElementId) -> f64 {
        0.0
    }

    fn inner_width(&self) -> f64 {
        0.0
    }

    fn inner_height(&self) -> f64 {
        0.0
    }

    fn set_style(&self, _element: ElementId, _property: &str, _value: &str) {}

    fn style(&self, _element: ElementId, _property: &str) -> Option<String> {
        None
    }

    fn remove_style(&self, _element: ElementId, _property: &str) {}

    fn computed_padding_right(&self, _element: ElementId) -> f64 {
        0.0
    }
}
