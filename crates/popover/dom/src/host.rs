use crate::{DetachedDocument, Document, Event, EventLoop, Window};
use std::rc::Rc;

/// The environment shared by every popover on a page.
///
/// Cloning a `Host` shares the same document, window and loop.
#[derive(Clone)]
pub struct Host {
    document: Rc<dyn Document>,
    window: Rc<Window>,
    event_loop: Rc<EventLoop>,
}

impl Host {
    /// Wrap a document with a fresh window registry and event loop.
    #[must_use]
    pub fn new(document: Rc<dyn Document>) -> Self {
        Self {
            document,
            window: Rc::new(Window::new()),
            event_loop: Rc::new(EventLoop::new()),
        }
    }

    /// A host with no document, for running outside a browser.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Rc::new(DetachedDocument))
    }

    /// The document popovers mount into and measure against.
    #[inline]
    #[must_use]
    pub fn document(&self) -> &dyn Document {
        &*self.document
    }

    /// Shared handle to the document.
    #[inline]
    #[must_use]
    pub fn document_handle(&self) -> Rc<dyn Document> {
        Rc::clone(&self.document)
    }

    /// Window and element listeners.
    #[inline]
    #[must_use]
    pub fn window(&self) -> &Rc<Window> {
        &self.window
    }

    /// Queue for next-tick and timed work.
    #[inline]
    #[must_use]
    pub fn event_loop(&self) -> &Rc<EventLoop> {
        &self.event_loop
    }

    /// Fire `event` at its target, letting it bubble up through the
    /// document to the window. Returns how many listeners ran.
    pub fn dispatch(&self, event: &Event) -> usize {
        self.window.dispatch_from(event, &*self.document)
    }

    /// Whether a usable document (one with a body) is present.
    #[inline]
    #[must_use]
    pub fn is_client(&self) -> bool {
        self.document.body().is_some()
    }
}
