//! Focus surface and arrow-key navigation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::input::{Key, KeyEvent};
use crate::subscription::{Listeners, Subscription};

/// Handle of an element registered with a [`FocusHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

#[derive(Debug)]
struct Element {
    id: ElementId,
    label: String,
    disabled: bool,
}

#[derive(Default)]
struct HostInner {
    next_id: Cell<u32>,
    elements: RefCell<Vec<Element>>,
    focused: Cell<Option<ElementId>>,
    key_listeners: Rc<Listeners<KeyEvent>>,
}

/// The focusable surface of the interface: registered elements, the
/// currently focused one, and key listeners.
///
/// Clones are handles to the same surface.
#[derive(Clone, Default)]
pub struct FocusHost {
    inner: Rc<HostInner>,
}

/// Non-owning handle to a [`FocusHost`], held by listeners registered on it.
#[derive(Clone)]
pub struct WeakFocusHost {
    inner: Weak<HostInner>,
}

impl WeakFocusHost {
    pub fn upgrade(&self) -> Option<FocusHost> {
        self.inner.upgrade().map(|inner| FocusHost { inner })
    }
}

impl FocusHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakFocusHost {
        WeakFocusHost {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn register(&self, label: impl Into<String>) -> ElementId {
        let id = ElementId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.elements.borrow_mut().push(Element {
            id,
            label: label.into(),
            disabled: false,
        });
        id
    }

    /// Remove an element. Focus is dropped if it was on that element.
    pub fn unregister(&self, id: ElementId) -> bool {
        let removed = {
            let mut elements = self.inner.elements.borrow_mut();
            let before = elements.len();
            elements.retain(|element| element.id != id);
            elements.len() != before
        };
        if removed && self.focused() == Some(id) {
            self.inner.focused.set(None);
        }
        removed
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.inner.elements.borrow().iter().any(|e| e.id == id)
    }

    pub fn label(&self, id: ElementId) -> Option<String> {
        self.inner
            .elements
            .borrow()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.label.clone())
    }

    pub fn set_disabled(&self, id: ElementId, disabled: bool) {
        let mut elements = self.inner.elements.borrow_mut();
        if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
            element.disabled = disabled;
        }
        drop(elements);
        if disabled && self.focused() == Some(id) {
            self.inner.focused.set(None);
        }
    }

    /// Registered and not disabled.
    pub fn is_focusable(&self, id: ElementId) -> bool {
        self.inner
            .elements
            .borrow()
            .iter()
            .any(|e| e.id == id && !e.disabled)
    }

    /// Move focus to `id`. Returns false, leaving focus untouched, when the
    /// element cannot take focus.
    pub fn focus(&self, id: ElementId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.inner.focused.set(Some(id));
        true
    }

    pub fn blur(&self) {
        self.inner.focused.set(None);
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.inner.focused.get()
    }

    /// Listen to every key dispatched through the host.
    pub fn on_key(&self, listener: impl Fn(&KeyEvent) + 'static) -> Subscription {
        Listeners::subscribe(&self.inner.key_listeners, listener)
    }

    pub fn key_listener_count(&self) -> usize {
        self.inner.key_listeners.len()
    }

    /// Deliver a key press to the listeners. Returns true if one of them
    /// handled it.
    pub fn dispatch_key(&self, event: &KeyEvent) -> bool {
        self.inner.key_listeners.emit(event);
        event.is_default_prevented()
    }
}

impl fmt::Debug for FocusHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusHost")
            .field("elements", &self.inner.elements.borrow().len())
            .field("focused", &self.focused())
            .field("key_listeners", &self.key_listener_count())
            .finish()
    }
}

/// Which arrow keys move focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
    Both,
}

/// Options for [`keyboard_navigation`].
#[derive(Clone)]
pub struct NavigationOptions {
    pub orientation: Orientation,
    /// Moving past either end continues from the other end.
    pub wrap: bool,
    /// Home and End jump to the first and last element.
    pub home_end: bool,
    /// Called with the focused element on Enter or Space.
    pub on_activate: Option<Rc<dyn Fn(ElementId)>>,
}

impl NavigationOptions {
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn on_activate(mut self, callback: impl Fn(ElementId) + 'static) -> Self {
        self.on_activate = Some(Rc::new(callback));
        self
    }
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            wrap: true,
            home_end: true,
            on_activate: None,
        }
    }
}

impl fmt::Debug for NavigationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationOptions")
            .field("orientation", &self.orientation)
            .field("wrap", &self.wrap)
            .field("home_end", &self.home_end)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

enum Move {
    Step(isize),
    First,
    Last,
}

fn movement(key: Key, options: &NavigationOptions) -> Option<Move> {
    let vertical = matches!(options.orientation, Orientation::Vertical | Orientation::Both);
    let horizontal = matches!(options.orientation, Orientation::Horizontal | Orientation::Both);
    match key {
        Key::ArrowDown if vertical => Some(Move::Step(1)),
        Key::ArrowUp if vertical => Some(Move::Step(-1)),
        Key::ArrowRight if horizontal => Some(Move::Step(1)),
        Key::ArrowLeft if horizontal => Some(Move::Step(-1)),
        Key::Home if options.home_end => Some(Move::First),
        Key::End if options.home_end => Some(Move::Last),
        _ => None,
    }
}

/// Next focusable element in `items` from `start`, moving by `step`.
/// Disabled elements are skipped.
pub(crate) fn next_focusable(
    host: &FocusHost,
    items: &[ElementId],
    start: usize,
    step: isize,
    wrap: bool,
) -> Option<ElementId> {
    let len = items.len() as isize;
    let mut index = start as isize;
    for _ in 0..items.len() {
        index += step;
        if index < 0 || index >= len {
            if !wrap {
                return None;
            }
            index = index.rem_euclid(len);
        }
        let candidate = items[index as usize];
        if host.is_focusable(candidate) {
            return Some(candidate);
        }
    }
    None
}

pub(crate) fn first_focusable(host: &FocusHost, items: &[ElementId]) -> Option<ElementId> {
    items.iter().copied().find(|id| host.is_focusable(*id))
}

pub(crate) fn last_focusable(host: &FocusHost, items: &[ElementId]) -> Option<ElementId> {
    items.iter().rev().copied().find(|id| host.is_focusable(*id))
}

/// Wire arrow-key navigation across `elements`, in order.
///
/// Keys are only handled while focus is on one of `elements`. An empty list
/// registers nothing and returns a no-op subscription. Dropping or
/// unsubscribing the returned subscription removes the listener.
pub fn keyboard_navigation(
    host: &FocusHost,
    elements: &[ElementId],
    options: NavigationOptions,
) -> Subscription {
    if elements.is_empty() {
        return Subscription::noop();
    }

    let items = elements.to_vec();
    let weak = host.downgrade();
    host.on_key(move |event| {
        let Some(host) = weak.upgrade() else {
            return;
        };
        let Some(current) = host.focused() else {
            return;
        };
        let Some(position) = items.iter().position(|id| *id == current) else {
            return;
        };

        if matches!(event.key(), Key::Enter | Key::Space) {
            if let Some(on_activate) = &options.on_activate {
                event.prevent_default();
                on_activate(current);
            }
            return;
        }

        let target = match movement(event.key(), &options) {
            Some(Move::Step(step)) => next_focusable(&host, &items, position, step, options.wrap),
            Some(Move::First) => first_focusable(&host, &items),
            Some(Move::Last) => last_focusable(&host, &items),
            None => return,
        };

        event.prevent_default();
        if let Some(target) = target {
            host.focus(target);
        }
    })
}
