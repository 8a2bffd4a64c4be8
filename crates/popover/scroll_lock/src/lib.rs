//! Document scroll locking with scrollbar compensation.
//!
//! Hiding the document overflow removes the vertical scrollbar, which widens
//! the viewport and shifts page content sideways. To avoid that jump the
//! manager pads a configurable set of layout regions on the right by exactly
//! the scrollbar width while the lock is held.
//!
//! The manager is a plain toggle: it neither counts nor guards lock calls, so
//! its owner must pair every `lock` with one `unlock`.

use popover_dom::{Document, ElementId};
use std::rc::Rc;

/// Width and height of the probe element used to measure scrollbars.
const PROBE_SIZE: &str = "99px";

/// Measure the width of a classic scrollbar in `document`.
///
/// Inserts an off-screen scrolling probe into the body, compares its offset
/// and client widths, and removes it again. Returns `0` without a body.
#[must_use]
pub fn measure_scrollbar_size(document: &dyn Document) -> f64 {
    let Some(body) = document.body() else {
        log::debug!(target: "popover::scroll_lock", "no document body, assuming overlay scrollbars");
        return 0.0;
    };
    let Some(probe) = document.create_element("div") else {
        return 0.0;
    };
    document.set_style(probe, "width", PROBE_SIZE);
    document.set_style(probe, "height", PROBE_SIZE);
    document.set_style(probe, "position", "absolute");
    document.set_style(probe, "top", "-9999px");
    document.set_style(probe, "overflow", "scroll");

    document.append_child(body, probe);
    let size = document.offset_width(probe) - document.client_width(probe);
    document.remove_child(body, probe);

    size.max(0.0)
}

/// Whether the document currently shows a vertical scrollbar.
#[must_use]
pub fn is_overflowing(document: &dyn Document) -> bool {
    document
        .root()
        .is_some_and(|root| document.inner_width() > document.client_width(root))
}

/// Whether `container` has more content than fits vertically.
///
/// The body is special-cased to the viewport check of [`is_overflowing`].
#[must_use]
pub fn is_container_overflowing(document: &dyn Document, container: ElementId) -> bool {
    if document.body() == Some(container) {
        return is_overflowing(document);
    }
    document.scroll_height(container) > document.client_height(container)
}

/// Locks and unlocks document scrolling for one popover.
pub struct ScrollLockManager {
    document: Rc<dyn Document>,
    selectors: Vec<String>,
    scrollbar_size: f64,
    disabled: bool,
}

impl ScrollLockManager {
    /// Create a manager padding the regions matched by `selectors`.
    ///
    /// The scrollbar width is measured once, here.
    #[must_use]
    pub fn new(document: Rc<dyn Document>, selectors: Vec<String>) -> Self {
        let scrollbar_size = measure_scrollbar_size(&*document);
        log::debug!(target: "popover::scroll_lock", "measured scrollbar size {scrollbar_size}px");
        Self {
            document,
            selectors,
            scrollbar_size,
            disabled: false,
        }
    }

    /// Scrollbar width measured at construction.
    #[inline]
    #[must_use]
    pub const fn scrollbar_size(&self) -> f64 {
        self.scrollbar_size
    }

    /// Whether the owner has opted out of scroll locking.
    #[inline]
    #[must_use]
    pub const fn disabled(&self) -> bool {
        self.disabled
    }

    #[inline]
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Selectors of the regions that receive padding compensation.
    #[inline]
    #[must_use]
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    /// See [`is_overflowing`].
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        is_overflowing(&*self.document)
    }

    /// Hide document overflow, padding regions first if a scrollbar is showing.
    pub fn lock(&self) {
        if self.is_overflowing() {
            self.shift_padding(self.scrollbar_size);
        }
        if let Some(body) = self.document.body() {
            self.document.set_style(body, "overflow", "hidden");
        }
    }

    /// Restore document overflow, then take back the padding if the scrollbar returned.
    pub fn unlock(&self) {
        if let Some(body) = self.document.body() {
            self.document.set_style(body, "overflow", "visible");
        }
        if self.is_overflowing() {
            self.shift_padding(-self.scrollbar_size);
        }
    }

    fn shift_padding(&self, delta: f64) {
        for selector in &self.selectors {
            let Some(region) = self.document.query_selector(selector) else {
                log::trace!(target: "popover::scroll_lock", "no element matches {selector}, skipping");
                continue;
            };
            let padding = self.document.computed_padding_right(region) + delta;
            self.document
                .set_style(region, "padding-right", &format!("{padding}px"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popover_dom::{DetachedDocument, HeadlessDocument};

    const SELECTORS: [&str; 3] = [".page-header", ".page-content", ".page-footer"];

    fn selectors() -> Vec<String> {
        SELECTORS.iter().map(|selector| (*selector).to_owned()).collect()
    }

    fn page(scrollbar: f64, content_height: f64) -> Rc<HeadlessDocument> {
        let document = HeadlessDocument::new(1024.0, 768.0).with_scrollbar_width(scrollbar);
        document.set_content_height(content_height);
        for selector in SELECTORS {
            let region = document.append_to_body("div");
            document.add_class(region, &selector[1..]);
        }
        Rc::new(document)
    }

    fn padding(document: &HeadlessDocument, selector: &str) -> f64 {
        document
            .query_selector(selector)
            .map_or(f64::NAN, |region| document.computed_padding_right(region))
    }

    #[test]
    fn measures_scrollbar_and_removes_probe() {
        let document = page(15.0, 768.0);
        let before = document.body().map(|body| document.children(body).len());
        let elements = document.element_count();
        assert!((measure_scrollbar_size(&*document) - 15.0).abs() < f64::EPSILON);
        let after = document.body().map(|body| document.children(body).len());
        assert_eq!(before, after);
        assert_eq!(document.element_count(), elements);
    }

    #[test]
    fn overlay_scrollbars_measure_zero() {
        let document = page(0.0, 3000.0);
        let manager = ScrollLockManager::new(document, selectors());
        assert!(manager.scrollbar_size().abs() < f64::EPSILON);
    }

    #[test]
    fn lock_round_trip_without_overflow_keeps_padding() {
        let document = page(15.0, 500.0);
        let manager = ScrollLockManager::new(Rc::clone(&document) as Rc<dyn Document>, selectors());
        assert!(!manager.is_overflowing());

        manager.lock();
        for selector in SELECTORS {
            assert!(padding(&document, selector).abs() < f64::EPSILON);
        }
        manager.unlock();
        for selector in SELECTORS {
            assert!(padding(&document, selector).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn lock_round_trip_with_overflow_restores_padding() {
        let document = page(15.0, 3000.0);
        if let Some(content) = document.query_selector(".page-content") {
            document.set_style(content, "padding-right", "24px");
        }
        let manager = ScrollLockManager::new(Rc::clone(&document) as Rc<dyn Document>, selectors());
        assert!(manager.is_overflowing());

        manager.lock();
        assert!(!manager.is_overflowing());
        let body = document.body();
        assert_eq!(body.and_then(|id| document.style(id, "overflow")).as_deref(), Some("hidden"));
        assert!((padding(&document, ".page-header") - 15.0).abs() < f64::EPSILON);
        assert!((padding(&document, ".page-content") - 39.0).abs() < f64::EPSILON);

        manager.unlock();
        assert!(manager.is_overflowing());
        assert_eq!(body.and_then(|id| document.style(id, "overflow")).as_deref(), Some("visible"));
        assert!(padding(&document, ".page-header").abs() < f64::EPSILON);
        assert!((padding(&document, ".page-content") - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_regions_are_skipped() {
        let document = Rc::new(HeadlessDocument::new(1024.0, 768.0).with_scrollbar_width(15.0));
        document.set_content_height(3000.0);
        let header = document.append_to_body("header");
        document.add_class(header, "page-header");
        let manager = ScrollLockManager::new(Rc::clone(&document) as Rc<dyn Document>, selectors());

        manager.lock();
        assert!((document.computed_padding_right(header) - 15.0).abs() < f64::EPSILON);
        manager.unlock();
        assert!(document.computed_padding_right(header).abs() < f64::EPSILON);
    }

    #[test]
    fn container_overflow_uses_scroll_height() {
        let document = HeadlessDocument::new(1024.0, 768.0);
        let list = document.append_to_body("ul");
        document.set_style(list, "height", "100px");
        document.set_scroll_height(list, 100.0);
        assert!(!is_container_overflowing(&document, list));
        document.set_scroll_height(list, 400.0);
        assert!(is_container_overflowing(&document, list));
    }

    #[test]
    fn detached_document_is_a_no_op() {
        let manager = ScrollLockManager::new(Rc::new(DetachedDocument), selectors());
        assert!(manager.scrollbar_size().abs() < f64::EPSILON);
        assert!(!manager.is_overflowing());
        manager.lock();
        manager.unlock();
    }

    #[test]
    fn disabled_flag_is_stored() {
        let mut manager = ScrollLockManager::new(Rc::new(DetachedDocument), selectors());
        assert!(!manager.disabled());
        manager.set_disabled(true);
        assert!(manager.disabled());
        assert_eq!(manager.selectors().len(), 3);
    }
}
