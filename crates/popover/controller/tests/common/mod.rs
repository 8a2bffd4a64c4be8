//! Shared page fixture for the popover integration tests.

use popover::{Event, Host};
use popover_dom::{Document, ElementId, HeadlessDocument};
use popover_geometry::Rect;
use std::rc::Rc;

pub const TRIGGER: Rect = Rect::new(100.0, 50.0, 40.0, 20.0);

pub fn init_logging() {
    if let Err(err) = env_logger::builder().is_test(true).try_init() {
        log::trace!("logger already initialised: {err}");
    }
}

/// Give a freshly mounted panel a 200x80 box.
pub fn sized_panel(document: &dyn Document, node: ElementId) {
    document.set_style(node, "width", "200px");
    document.set_style(node, "height", "80px");
}

/// A 1024x768 page with 15px classic scrollbars, the three padded layout
/// regions, a trigger button and an unrelated element to click on.
pub struct Page {
    pub document: Rc<HeadlessDocument>,
    pub host: Host,
    pub trigger: ElementId,
    pub outside: ElementId,
}

impl Page {
    pub fn new(content_height: f64) -> Self {
        init_logging();
        let document = Rc::new(HeadlessDocument::new(1024.0, 768.0).with_scrollbar_width(15.0));
        document.set_content_height(content_height);
        for class in ["page-header", "page-content", "page-footer"] {
            let region = document.append_to_body("div");
            document.add_class(region, class);
        }
        let trigger = document.append_to_body("button");
        document.set_rect(trigger, TRIGGER);
        let outside = document.append_to_body("main");
        let host = Host::new(Rc::clone(&document) as Rc<dyn Document>);
        Self {
            document,
            host,
            trigger,
            outside,
        }
    }

    /// Click `target`, bubbling through the document. Returns how many
    /// listeners ran.
    pub fn click(&self, target: ElementId) -> usize {
        self.host.dispatch(&Event::click(target))
    }

    pub fn padding(&self, selector: &str) -> f64 {
        self.document
            .query_selector(selector)
            .map_or(f64::NAN, |region| self.document.computed_padding_right(region))
    }

    pub fn body_style(&self, property: &str) -> Option<String> {
        self.document
            .body()
            .and_then(|body| self.document.style(body, property))
    }

    pub fn style_of(&self, node: Option<ElementId>, property: &str) -> Option<String> {
        node.and_then(|id| self.document.style(id, property))
    }
}
