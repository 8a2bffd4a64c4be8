//! Event listeners on the window and on individual elements.

use crate::document::{Document, ElementId};
use core::cell::RefCell;
use std::rc::Rc;

/// Global events a popover listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A click anywhere in the window.
    Click,
    /// The window was resized.
    Resize,
}

/// An event delivered to window listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Element the event originated from, when there is one.
    pub target: Option<ElementId>,
}

impl Event {
    /// A click on `target`.
    #[inline]
    #[must_use]
    pub const fn click(target: ElementId) -> Self {
        Self {
            kind: EventKind::Click,
            target: Some(target),
        }
    }

    /// A window resize.
    #[inline]
    #[must_use]
    pub const fn resize() -> Self {
        Self {
            kind: EventKind::Resize,
            target: None,
        }
    }
}

/// Callback invoked for a dispatched event.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Handle returned by [`Window::add_listener`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A listener picked for delivery, with the element it sits on.
type Delivery = (Option<ElementId>, ListenerId, Listener);

struct Registration {
    id: ListenerId,
    kind: EventKind,
    /// Element the listener is attached to; `None` for the window.
    scope: Option<ElementId>,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

/// Process-wide listener registry.
///
/// Listeners sit either on the window, where they see every event of their
/// kind, or on an element, where they only see events targeted inside it.
/// They are identified by handle rather than by function identity, so a
/// caller must keep the [`ListenerId`] around to remove what it added.
#[derive(Default)]
pub struct Window {
    registry: RefCell<Registry>,
}

impl Window {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window `listener` for events of `kind`.
    pub fn add_listener(&self, kind: EventKind, listener: impl Fn(&Event) + 'static) -> ListenerId {
        self.register(kind, None, Rc::new(listener))
    }

    /// Register `listener` on `element`. It only runs for events whose
    /// target is `element` or one of its descendants, and only when the event
    /// goes through [`Window::dispatch_from`].
    pub fn add_element_listener(
        &self,
        element: ElementId,
        kind: EventKind,
        listener: impl Fn(&Event) + 'static,
    ) -> ListenerId {
        self.register(kind, Some(element), Rc::new(listener))
    }

    fn register(&self, kind: EventKind, scope: Option<ElementId>, listener: Listener) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.registrations.push(Registration {
            id,
            kind,
            scope,
            listener,
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.registrations.len();
        registry.registrations.retain(|registration| registration.id != id);
        registry.registrations.len() != before
    }

    /// Number of window listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .registrations
            .iter()
            .filter(|registration| registration.scope.is_none() && registration.kind == kind)
            .count()
    }

    /// Number of listeners attached to `element`, of any kind.
    #[must_use]
    pub fn element_listener_count(&self, element: ElementId) -> usize {
        self.registry
            .borrow()
            .registrations
            .iter()
            .filter(|registration| registration.scope == Some(element))
            .count()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.registry
            .borrow()
            .registrations
            .iter()
            .any(|registration| registration.id == id)
    }

    /// Deliver `event` to every window listener registered for its kind.
    ///
    /// Listeners may add or remove listeners while running. A listener removed
    /// during dispatch is not called; one added during dispatch waits for the
    /// next event. Returns how many listeners ran.
    pub fn dispatch(&self, event: &Event) -> usize {
        let snapshot = self.snapshot(event.kind, |scope| scope.is_none());
        self.deliver(event, snapshot)
    }

    /// Deliver `event` the way it bubbles through `document`: first to the
    /// listeners of elements containing its target, then to the window.
    ///
    /// The same rules as [`Window::dispatch`] apply to listeners added or
    /// removed along the way.
    pub fn dispatch_from(&self, event: &Event, document: &dyn Document) -> usize {
        let on_path = |scope: Option<ElementId>| {
            scope
                .zip(event.target)
                .is_some_and(|(element, target)| document.contains(element, target))
        };
        let mut snapshot = self.snapshot(event.kind, |scope| scope.is_some());
        snapshot.retain(|(scope, _id, _listener)| on_path(*scope));
        snapshot.extend(self.snapshot(event.kind, |scope| scope.is_none()));
        self.deliver(event, snapshot)
    }

    fn snapshot(
        &self,
        kind: EventKind,
        accept: impl Fn(Option<ElementId>) -> bool,
    ) -> Vec<Delivery> {
        self.registry
            .borrow()
            .registrations
            .iter()
            .filter(|registration| registration.kind == kind && accept(registration.scope))
            .map(|registration| (registration.scope, registration.id, Rc::clone(&registration.listener)))
            .collect()
    }

    fn deliver(&self, event: &Event, snapshot: Vec<Delivery>) -> usize {
        let mut delivered = 0;
        for (_scope, id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            listener(event);
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessDocument;
    use core::cell::{Cell, RefCell};

    #[test]
    fn dispatch_reaches_matching_kind_only() {
        let window = Window::new();
        let clicks = Rc::new(Cell::new(0));
        let resizes = Rc::new(Cell::new(0));
        let click_counter = Rc::clone(&clicks);
        let resize_counter = Rc::clone(&resizes);
        window.add_listener(EventKind::Click, move |_event| click_counter.set(click_counter.get() + 1));
        window.add_listener(EventKind::Resize, move |_event| resize_counter.set(resize_counter.get() + 1));

        assert_eq!(window.dispatch(&Event::click(ElementId::new(3))), 1);
        assert_eq!(window.dispatch(&Event::resize()), 1);
        assert_eq!(window.dispatch(&Event::resize()), 1);
        assert_eq!(clicks.get(), 1);
        assert_eq!(resizes.get(), 2);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let window = Window::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = window.add_listener(EventKind::Click, move |_event| counter.set(counter.get() + 1));
        assert!(window.remove_listener(id));
        assert!(!window.remove_listener(id));
        assert_eq!(window.dispatch(&Event::click(ElementId::new(1))), 0);
        assert_eq!(calls.get(), 0);
        assert_eq!(window.listener_count(EventKind::Click), 0);
    }

    #[test]
    fn listener_removed_mid_dispatch_is_skipped() {
        let window = Rc::new(Window::new());
        let second_calls = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None));

        let remover_window = Rc::clone(&window);
        let remover_victim = Rc::clone(&victim);
        window.add_listener(EventKind::Resize, move |_event| {
            if let Some(id) = remover_victim.get() {
                remover_window.remove_listener(id);
            }
        });
        let counter = Rc::clone(&second_calls);
        victim.set(Some(window.add_listener(EventKind::Resize, move |_event| {
            counter.set(counter.get() + 1);
        })));

        assert_eq!(window.dispatch(&Event::resize()), 1);
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn element_listeners_see_only_clicks_inside_their_element() {
        let document = HeadlessDocument::new(800.0, 600.0);
        let button = document.append_to_body("button");
        let label = document.create_element("span").unwrap_or(button);
        document.append_child(button, label);
        let elsewhere = document.append_to_body("main");

        let window = Window::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let window_order = Rc::clone(&order);
        let element_order = Rc::clone(&order);
        window.add_listener(EventKind::Click, move |_event| window_order.borrow_mut().push("window"));
        window.add_element_listener(button, EventKind::Click, move |_event| {
            element_order.borrow_mut().push("button");
        });
        assert_eq!(window.listener_count(EventKind::Click), 1);
        assert_eq!(window.element_listener_count(button), 1);

        assert_eq!(window.dispatch_from(&Event::click(label), &document), 2);
        assert_eq!(*order.borrow(), vec!["button", "window"]);

        order.borrow_mut().clear();
        assert_eq!(window.dispatch_from(&Event::click(elsewhere), &document), 1);
        assert_eq!(window.dispatch(&Event::click(label)), 1);
        assert_eq!(*order.borrow(), vec!["window", "window"]);
    }
}
