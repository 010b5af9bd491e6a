use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::keyboard::{first_focusable, last_focusable, next_focusable, ElementId, FocusHost};
use crate::input::Key;
use crate::subscription::Subscription;

/// Options for [`focus_trap`].
#[derive(Clone, Default)]
pub struct TrapOptions {
    /// Element focused when the trap activates. Defaults to the first
    /// focusable element of the container.
    pub initial_focus: Option<ElementId>,
    /// Return focus to the element focused before activation on teardown.
    pub return_focus: bool,
    /// Called when Escape is pressed inside the trap.
    pub on_escape: Option<Rc<dyn Fn()>>,
}

impl TrapOptions {
    pub fn returning_focus() -> Self {
        Self {
            return_focus: true,
            ..Self::default()
        }
    }

    pub fn with_initial_focus(mut self, id: ElementId) -> Self {
        self.initial_focus = Some(id);
        self
    }

    pub fn on_escape(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_escape = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for TrapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrapOptions")
            .field("initial_focus", &self.initial_focus)
            .field("return_focus", &self.return_focus)
            .field("on_escape", &self.on_escape.is_some())
            .finish()
    }
}

/// Keep Tab / Shift+Tab focus cycling inside `container` until the returned
/// subscription is torn down.
///
/// Activation moves focus into the container unless it is already there.
/// Teardown removes the key listener and, with
/// [`TrapOptions::return_focus`], refocuses the previously focused element.
/// An empty container registers nothing.
pub fn focus_trap(host: &FocusHost, container: &[ElementId], options: TrapOptions) -> Subscription {
    if container.is_empty() {
        return Subscription::noop();
    }

    let items = container.to_vec();
    let previous = host.focused();
    if !previous.is_some_and(|id| items.contains(&id)) {
        let target = options
            .initial_focus
            .filter(|id| items.contains(id) && host.is_focusable(*id))
            .or_else(|| first_focusable(host, &items));
        if let Some(target) = target {
            host.focus(target);
        }
    }

    let weak = host.downgrade();
    let on_escape = options.on_escape.clone();
    let trap_items = items.clone();
    let mut listener = host.on_key(move |event| {
        let Some(host) = weak.upgrade() else {
            return;
        };
        match event.key() {
            Key::Tab => {
                event.prevent_default();
                let position = host
                    .focused()
                    .and_then(|current| trap_items.iter().position(|id| *id == current));
                let step = if event.shift() { -1 } else { 1 };
                let target = match position {
                    Some(position) => next_focusable(&host, &trap_items, position, step, true),
                    None if event.shift() => last_focusable(&host, &trap_items),
                    None => first_focusable(&host, &trap_items),
                };
                if let Some(target) = target {
                    host.focus(target);
                }
            }
            Key::Escape => {
                if let Some(on_escape) = &on_escape {
                    event.prevent_default();
                    on_escape();
                }
            }
            _ => {}
        }
    });

    log::trace!("Focus trap activated over {} elements", items.len());
    let weak = host.downgrade();
    let return_focus = options.return_focus;
    Subscription::new(move || {
        listener.unsubscribe();
        if !return_focus {
            return;
        }
        if let (Some(host), Some(previous)) = (weak.upgrade(), previous) {
            host.focus(previous);
        }
    })
}

/// Save and later restore the focused element, e.g. around a modal.
#[derive(Debug, Clone)]
pub struct FocusManager {
    host: FocusHost,
    saved: Rc<Cell<Option<ElementId>>>,
}

impl FocusManager {
    pub fn new(host: FocusHost) -> Self {
        Self {
            host,
            saved: Rc::new(Cell::new(None)),
        }
    }

    /// Remember the element focused right now.
    pub fn save(&self) -> Option<ElementId> {
        let focused = self.host.focused();
        self.saved.set(focused);
        focused
    }

    /// Refocus the saved element. Without a prior save, or when the saved
    /// element is gone, nothing happens and false is returned.
    pub fn restore(&self) -> bool {
        match self.saved.get() {
            Some(id) => self.host.focus(id),
            None => false,
        }
    }

    pub fn saved(&self) -> Option<ElementId> {
        self.saved.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyEvent;

    fn dialog(host: &FocusHost) -> (ElementId, Vec<ElementId>) {
        let opener = host.register("Open settings");
        let items = ["Close", "Name", "Save"]
            .into_iter()
            .map(|label| host.register(label))
            .collect();
        (opener, items)
    }

    #[test]
    fn test_trap_cycles_tab_within_container() {
        let host = FocusHost::new();
        let (opener, items) = dialog(&host);
        host.focus(opener);
        let _trap = focus_trap(&host, &items, TrapOptions::default());
        assert_eq!(host.focused(), Some(items[0]));

        host.dispatch_key(&KeyEvent::new(Key::Tab));
        host.dispatch_key(&KeyEvent::new(Key::Tab));
        assert_eq!(host.focused(), Some(items[2]));
        host.dispatch_key(&KeyEvent::new(Key::Tab));
        assert_eq!(host.focused(), Some(items[0]));
        host.dispatch_key(&KeyEvent::new(Key::Tab).with_shift());
        assert_eq!(host.focused(), Some(items[2]));
    }

    #[test]
    fn test_trap_teardown_leaves_no_listeners_and_returns_focus() {
        let host = FocusHost::new();
        let (opener, items) = dialog(&host);
        host.focus(opener);

        let mut trap = focus_trap(
            &host,
            &items,
            TrapOptions::returning_focus().with_initial_focus(items[1]),
        );
        assert_eq!(host.focused(), Some(items[1]));
        assert_eq!(host.key_listener_count(), 1);

        trap.unsubscribe();
        trap.unsubscribe();
        assert_eq!(host.key_listener_count(), 0);
        assert_eq!(host.focused(), Some(opener));
    }

    #[test]
    fn test_trap_escape_callback() {
        let host = FocusHost::new();
        let (_, items) = dialog(&host);
        let closed = Rc::new(Cell::new(false));
        let sink = Rc::clone(&closed);
        let _trap = focus_trap(&host, &items, TrapOptions::default().on_escape(move || sink.set(true)));

        assert!(host.dispatch_key(&KeyEvent::new(Key::Escape)));
        assert!(closed.get());
    }

    #[test]
    fn test_empty_trap_is_noop() {
        let host = FocusHost::new();
        let (opener, _) = dialog(&host);
        host.focus(opener);
        let trap = focus_trap(&host, &[], TrapOptions::returning_focus());
        assert!(!trap.is_active());
        assert_eq!(host.key_listener_count(), 0);
        assert_eq!(host.focused(), Some(opener));
    }

    #[test]
    fn test_restore_without_save_is_noop() {
        let host = FocusHost::new();
        let (opener, _) = dialog(&host);
        host.focus(opener);

        let manager = FocusManager::new(host.clone());
        assert!(!manager.restore());
        assert_eq!(host.focused(), Some(opener));
    }

    #[test]
    fn test_save_then_restore() {
        let host = FocusHost::new();
        let (opener, items) = dialog(&host);
        host.focus(opener);

        let manager = FocusManager::new(host.clone());
        assert_eq!(manager.save(), Some(opener));
        host.focus(items[2]);
        assert!(manager.restore());
        assert_eq!(host.focused(), Some(opener));

        host.unregister(opener);
        assert!(!manager.restore());
    }
}
