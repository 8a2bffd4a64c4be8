//! The popover state machine.
//!
//! A popover is `CLOSED` or `OPEN`. Opening locks document scrolling and
//! mounts the content; closing unlocks, compensates the panel for the returning
//! scrollbar and fades the content out before unmounting it. A click listener
//! on the trigger element toggles it. While content is mounted, window `click`
//! and `resize` listeners keep the panel positioned and close it on click-away.
//!
//! State lives behind a `RefCell` and every callback into host code runs after
//! the borrow is released, so handlers may call back into the popover.

use crate::options::{ChangeHandler, ClickAwayHandler, CloseHandler, RenderHandler};
use crate::{BodyPortal, Fade, PopoverConfig, PopoverOptions, PopoverProps, Portal, Transition};
use anyhow::{Result, anyhow};
use core::cell::RefCell;
use popover_dom::{Document, ElementId, Event, EventKind, Host, ListenerId};
use popover_geometry::{Axis, AxisOrigin, Frame, Rect};
use popover_placement::{Placement, Position, Style, resolve};
use popover_scroll_lock::ScrollLockManager;
use std::rc::{Rc, Weak};
use tracing::debug_span;

#[derive(Default)]
struct Handlers {
    on_change: Option<ChangeHandler>,
    on_close: Option<CloseHandler>,
    on_click_away: Option<ClickAwayHandler>,
    render: Option<RenderHandler>,
}

#[derive(Clone, Copy)]
struct Listeners {
    click: ListenerId,
    resize: ListenerId,
}

/// The scroll lock manager plus whether this popover currently holds the lock.
///
/// The manager itself does not count, so pairing is enforced here.
struct ScrollLock {
    manager: ScrollLockManager,
    held: bool,
}

impl ScrollLock {
    fn acquire(&mut self) {
        if !self.held && !self.manager.disabled() {
            self.manager.lock();
            self.held = true;
        }
    }

    fn release(&mut self) {
        if self.held {
            self.manager.unlock();
            self.held = false;
        }
    }

    const fn origin(&self) -> AxisOrigin {
        if self.manager.disabled() {
            AxisOrigin::Body
        } else {
            AxisOrigin::Window
        }
    }
}

struct State {
    /// Internal open flag.
    open: bool,
    /// Last `open` value supplied by the host.
    open_prop: bool,
    torn_down: bool,
    trigger: Option<ElementId>,
    anchor: Option<ElementId>,
    options: PopoverOptions,
    style: Style,
    scroll_lock: ScrollLock,
    portal: Box<dyn Portal>,
    content: Option<ElementId>,
    listeners: Option<Listeners>,
    trigger_listener: Option<ListenerId>,
    /// Bumped by every enter and exit so a stale unmount timer can tell it lost.
    exit_generation: u64,
}

struct Inner {
    host: Host,
    transition: Box<dyn Transition>,
    state: RefCell<State>,
    handlers: RefCell<Handlers>,
}

/// A popover anchored to a trigger element.
///
/// Dropping the popover tears it down: listeners are removed, a held scroll
/// lock is released and the portal container leaves the document.
pub struct Popover {
    inner: Rc<Inner>,
}

impl Popover {
    /// Create a popover with a body portal and a fade transition.
    #[must_use]
    pub fn new(host: &Host, config: &PopoverConfig, props: PopoverProps) -> Self {
        let portal = BodyPortal::new(props.options.z_index(config));
        let fade = Fade::new(props.options.transition_duration(config));
        Self::with_parts(host, config, props, Box::new(portal), Box::new(fade))
    }

    /// Create a popover with a custom portal and transition.
    #[must_use]
    pub fn with_parts(
        host: &Host,
        config: &PopoverConfig,
        props: PopoverProps,
        mut portal: Box<dyn Portal>,
        transition: Box<dyn Transition>,
    ) -> Self {
        let mut manager = ScrollLockManager::new(host.document_handle(), config.padding_selectors.clone());
        manager.set_disabled(props.options.disable_scroll_lock);
        let scroll_lock = ScrollLock { manager, held: false };
        if portal.mount(host.document()).is_none() {
            log::debug!(target: "popover", "no document body, popover content will not mount");
        }

        let initial_position = Position::for_origin(scroll_lock.origin());
        let state = State {
            open: false,
            open_prop: props.open,
            torn_down: false,
            trigger: props.trigger,
            anchor: props.anchor,
            options: props.options,
            style: Style::new(initial_position),
            scroll_lock,
            portal,
            content: None,
            listeners: None,
            trigger_listener: None,
            exit_generation: 0,
        };
        let handlers = Handlers {
            on_change: props.on_change,
            on_close: props.on_close,
            on_click_away: props.on_click_away,
            render: props.render,
        };
        let inner = Rc::new(Inner {
            host: host.clone(),
            transition,
            state: RefCell::new(state),
            handlers: RefCell::new(handlers),
        });

        inner.bind_trigger();
        if props.open {
            inner.handle_open();
        }
        Self { inner }
    }

    /// Feed a new `open` prop. Only a change from the previous prop acts, so
    /// a popover toggled by its trigger is not forced back by a stale prop.
    pub fn set_open(&self, open: bool) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.open_prop != open;
            state.open_prop = open;
            changed
        };
        if changed {
            self.inner.toggle(Some(open));
        }
    }

    /// Open. No-op when already open.
    pub fn open(&self) {
        self.inner.handle_open();
    }

    /// Close. No-op when already closed.
    pub fn close(&self) {
        self.inner.handle_close();
    }

    /// Flip the open state, as a click on the trigger does.
    pub fn toggle(&self) {
        self.inner.toggle(None);
    }

    /// Opt in or out of scroll locking. Takes effect immediately, including
    /// the lock itself and the coordinate origin, while open.
    pub fn set_disable_scroll_lock(&self, disabled: bool) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.scroll_lock.manager.disabled() == disabled {
                return;
            }
            state.scroll_lock.manager.set_disabled(disabled);
            state.options.disable_scroll_lock = disabled;
            if disabled {
                state.scroll_lock.release();
            } else if state.open {
                state.scroll_lock.acquire();
            }
        }
        self.inner.reposition();
    }

    /// Move the panel to `placement`.
    pub fn set_placement(&self, placement: Placement) {
        self.inner.state.borrow_mut().options.placement = Some(placement);
        self.inner.reposition();
    }

    /// Replace both offsets. `None` falls back to the placement default.
    pub fn set_offsets(&self, offset_x: Option<f64>, offset_y: Option<f64>) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.options.offset_x = offset_x;
            state.options.offset_y = offset_y;
        }
        self.inner.reposition();
    }

    /// Position against `anchor` instead of the trigger.
    pub fn set_anchor(&self, anchor: Option<ElementId>) {
        self.inner.state.borrow_mut().anchor = anchor;
        self.inner.reposition();
    }

    /// Replace the trigger element. The toggle listener moves with it.
    pub fn set_trigger(&self, trigger: Option<ElementId>) {
        self.inner.state.borrow_mut().trigger = trigger;
        self.inner.bind_trigger();
        self.inner.reposition();
    }

    /// Replace the click-away handler. `None` restores closing on click-away.
    pub fn set_on_click_away(&self, handler: Option<ClickAwayHandler>) {
        self.inner.handlers.borrow_mut().on_click_away = handler;
    }

    /// Internal open state.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().open
    }

    /// Whether this popover holds the document scroll lock.
    #[must_use]
    pub fn holds_scroll_lock(&self) -> bool {
        self.inner.state.borrow().scroll_lock.held
    }

    /// Last computed panel style.
    #[must_use]
    pub fn style(&self) -> Style {
        self.inner.state.borrow().style
    }

    /// The mounted content node.
    #[must_use]
    pub fn content(&self) -> Option<ElementId> {
        self.inner.state.borrow().content
    }

    /// The portal container content mounts into.
    #[must_use]
    pub fn container(&self) -> Option<ElementId> {
        self.inner.state.borrow().portal.container()
    }

    /// Current options, including changes made through the setters.
    #[must_use]
    pub fn options(&self) -> PopoverOptions {
        self.inner.state.borrow().options.clone()
    }

    /// Recompute the panel position from live measurements.
    pub fn reposition(&self) {
        self.inner.reposition();
    }

    /// Release everything the popover holds in the document. Idempotent;
    /// also runs on drop.
    pub fn teardown(&self) {
        self.inner.teardown();
    }
}

impl Inner {
    fn document(&self) -> &dyn Document {
        self.host.document()
    }

    fn toggle(self: &Rc<Self>, open: Option<bool>) {
        let open = open.unwrap_or_else(|| !self.state.borrow().open);
        if open {
            self.handle_open();
        } else {
            self.handle_close();
        }
    }

    fn handle_open(self: &Rc<Self>) {
        {
            let mut state = self.state.borrow_mut();
            if state.open || state.torn_down {
                return;
            }
            state.scroll_lock.acquire();
            state.open = true;
        }
        log::debug!(target: "popover", "opened");
        self.enter();
        self.notify(true);
    }

    fn handle_close(self: &Rc<Self>) {
        {
            let mut state = self.state.borrow_mut();
            if !state.open {
                return;
            }
            state.scroll_lock.release();
            state.open = false;
            let manager = &state.scroll_lock.manager;
            if !manager.disabled() && manager.is_overflowing() {
                let size = manager.scrollbar_size();
                state.style.compensate_scrollbar(size);
            }
        }
        log::debug!(target: "popover", "closed");
        self.apply_style();
        self.exit();
        self.notify(false);
    }

    fn notify(&self, open: bool) {
        let (on_change, on_close) = {
            let handlers = self.handlers.borrow();
            (handlers.on_change.clone(), handlers.on_close.clone())
        };
        if let Some(on_change) = on_change {
            on_change(open);
        }
        if let Some(on_close) = on_close.filter(|_handler| !open) {
            on_close();
        }
    }

    /// Show the content node, mounting it on first use.
    fn enter(self: &Rc<Self>) {
        let (container, existing) = {
            let mut state = self.state.borrow_mut();
            state.exit_generation += 1;
            (state.portal.container(), state.content)
        };
        let Some(container) = container else {
            return;
        };
        let Some(node) = self.transition.enter(self.document(), container, existing) else {
            log::debug!(target: "popover", "transition produced no content node");
            return;
        };
        self.state.borrow_mut().content = Some(node);

        if existing.is_none() {
            self.apply_style();
            let render = self.handlers.borrow().render.clone();
            if let Some(render) = render {
                render(self.document(), node);
            }
            self.content_mounted();
        }
        self.reposition();
    }

    /// Start the exit transition and schedule the unmount.
    fn exit(self: &Rc<Self>) {
        let (node, generation) = {
            let mut state = self.state.borrow_mut();
            state.exit_generation += 1;
            (state.content, state.exit_generation)
        };
        let Some(node) = node else {
            return;
        };
        let duration = self.transition.exit(self.document(), node);
        let weak = Rc::downgrade(self);
        self.host.event_loop().schedule(duration, move || {
            if let Some(inner) = weak.upgrade() {
                inner.finish_exit(generation);
            }
        });
    }

    fn finish_exit(&self, generation: u64) {
        let (container, node) = {
            let mut state = self.state.borrow_mut();
            if state.open || state.exit_generation != generation {
                return;
            }
            (state.portal.container(), state.content.take())
        };
        self.remove_listeners();
        if let Some((container, node)) = container.zip(node) {
            self.transition.unmount(self.document(), container, node);
            log::debug!(target: "popover", "content {node:?} unmounted");
        }
    }

    /// Attach window listeners on the next tick, so the click that opened the
    /// popover cannot also count as a click-away.
    fn content_mounted(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.host.event_loop().defer(move || {
            if let Some(inner) = weak.upgrade() {
                inner.attach_listeners();
            }
        });
    }

    fn attach_listeners(self: &Rc<Self>) {
        {
            let state = self.state.borrow();
            if state.torn_down || state.content.is_none() || state.listeners.is_some() {
                return;
            }
        }
        let window = self.host.window();
        let click = Self::listener(Rc::downgrade(self), |inner, event| inner.handle_click_away(event));
        let resize = Self::listener(Rc::downgrade(self), |inner, _event| inner.reposition());
        let listeners = Listeners {
            click: window.add_listener(EventKind::Click, click),
            resize: window.add_listener(EventKind::Resize, resize),
        };
        self.state.borrow_mut().listeners = Some(listeners);
        log::debug!(target: "popover", "window listeners attached");
    }

    fn remove_listeners(&self) {
        let listeners = self.state.borrow_mut().listeners.take();
        if let Some(listeners) = listeners {
            let window = self.host.window();
            window.remove_listener(listeners.click);
            window.remove_listener(listeners.resize);
            log::debug!(target: "popover", "window listeners removed");
        }
    }

    /// Listen for clicks on the current trigger element, dropping the
    /// listener on any previous one.
    fn bind_trigger(self: &Rc<Self>) {
        let (previous, trigger) = {
            let mut state = self.state.borrow_mut();
            let trigger = state.trigger.filter(|_trigger| !state.torn_down);
            (state.trigger_listener.take(), trigger)
        };
        let window = self.host.window();
        if let Some(previous) = previous {
            window.remove_listener(previous);
        }
        let Some(trigger) = trigger else {
            return;
        };
        let toggle = Self::listener(Rc::downgrade(self), |inner, _event| inner.toggle(None));
        let id = window.add_element_listener(trigger, EventKind::Click, toggle);
        self.state.borrow_mut().trigger_listener = Some(id);
    }

    /// Wrap `handler` so the window only holds a weak reference to the popover.
    fn listener(weak: Weak<Self>, handler: impl Fn(&Rc<Self>, &Event) + 'static) -> impl Fn(&Event) + 'static {
        move |event| {
            if let Some(inner) = weak.upgrade() {
                handler(&inner, event);
            }
        }
    }

    fn handle_click_away(self: &Rc<Self>, event: &Event) {
        let (open, watched) = {
            let state = self.state.borrow();
            (state.open, [state.content, state.trigger, state.anchor])
        };
        if !open {
            return;
        }
        // The trigger handles its own clicks, and a click on the panel is
        // not a click away from it.
        let inside = event.target.is_some_and(|target| {
            watched
                .into_iter()
                .flatten()
                .any(|element| self.document().contains(element, target))
        });
        if inside {
            return;
        }

        self.reposition();
        let on_click_away = self.handlers.borrow().on_click_away.clone();
        match on_click_away {
            Some(on_click_away) => on_click_away(event),
            None => self.handle_close(),
        }
    }

    fn reposition(&self) {
        let _span = debug_span!("popover.reposition").entered();
        match self.compute_style() {
            Ok(Some(style)) => {
                self.state.borrow_mut().style = style;
                self.apply_style();
            }
            Ok(None) => {}
            Err(err) => log::error!(target: "popover", "cannot position popover: {err}"),
        }
    }

    /// Resolve the panel style from live rects. `None` while closed.
    fn compute_style(&self) -> Result<Option<Style>> {
        let state = self.state.borrow();
        if !state.open {
            return Ok(None);
        }
        let trigger = state.anchor.or(state.trigger).ok_or_else(|| {
            anyhow!("no trigger element received, pass an anchor or a trigger to the popover")
        })?;
        let content = state
            .content
            .ok_or_else(|| anyhow!("popover content is not mounted yet"))?;

        let document = self.document();
        let frame = measure_frame(document, state.scroll_lock.origin());
        let trigger_rect = document.bounding_client_rect(trigger);
        let popover_rect = document.bounding_client_rect(content);
        let placement = state.options.placement();
        let style = resolve(
            placement,
            &frame,
            &trigger_rect,
            &popover_rect,
            state.options.offset(Axis::Horizontal),
            state.options.offset(Axis::Vertical),
        );
        log::trace!(target: "popover", "resolved {placement} to {style:?}");
        Ok(Some(style))
    }

    fn apply_style(&self) {
        let (content, style) = {
            let state = self.state.borrow();
            (state.content, state.style)
        };
        let Some(content) = content else {
            return;
        };
        let document = self.document();
        for (property, value) in style.declarations() {
            match value {
                Some(value) => document.set_style(content, property, &value),
                None => document.remove_style(content, property),
            }
        }
    }

    fn teardown(&self) {
        let (listeners, trigger_listener, container, content) = {
            let mut state = self.state.borrow_mut();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            state.scroll_lock.release();
            state.open = false;
            (
                state.listeners.take(),
                state.trigger_listener.take(),
                state.portal.container(),
                state.content.take(),
            )
        };

        let window = self.host.window();
        if let Some(listeners) = listeners {
            window.remove_listener(listeners.click);
            window.remove_listener(listeners.resize);
        }
        if let Some(id) = trigger_listener {
            window.remove_listener(id);
        }
        if let Some((container, content)) = container.zip(content) {
            self.transition.unmount(self.document(), container, content);
        }
        self.state.borrow_mut().portal.detach(self.document());
        log::debug!(target: "popover", "torn down");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Snapshot the coordinate frame: body rect and the viewport's client size.
fn measure_frame(document: &dyn Document, origin: AxisOrigin) -> Frame {
    let body = document
        .body()
        .map_or_else(Rect::default, |body| document.bounding_client_rect(body));
    let (width, height) = document.root().map_or_else(
        || (document.inner_width(), document.inner_height()),
        |root| (document.client_width(root), document.client_height(root)),
    );
    Frame::new(origin, body, width, height)
}
