//! Listener registries and disposable subscriptions.
//!
//! Every signal in the crate (color scheme, reduced motion, input modality,
//! key events, theme changes) keeps its callbacks in a [`Listeners`]
//! registry. Registering through [`Listeners::subscribe`] returns a
//! [`Subscription`] that removes the callback when it is unsubscribed or
//! dropped, whichever comes first.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifier of a callback registered in a [`Listeners`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

/// Ordered registry of callbacks for a single event type.
pub struct Listeners<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Callback<T>)>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback and return its id.
    pub fn add(&self, callback: Rc<dyn Fn(&T)>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, callback));
        id
    }

    /// Remove a callback. Returns false when the id was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Invoke every registered callback with `value`.
    ///
    /// The callback list is snapshotted before the first call, so callbacks
    /// may add or remove listeners (including themselves) while running.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(value);
        }
    }
}

impl<T: 'static> Listeners<T> {
    /// Register a callback on a shared registry and return a subscription
    /// that removes it again.
    ///
    /// The subscription only holds a weak reference to the registry, so it
    /// never keeps a dropped signal alive.
    pub fn subscribe(this: &Rc<Self>, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = this.add(Rc::new(callback));
        let registry = Rc::downgrade(this);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.remove(id);
            }
        })
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Disposer for a registered listener.
///
/// The teardown runs at most once: either on the first call to
/// [`Subscription::unsubscribe`] or when the subscription is dropped.
/// Further calls to `unsubscribe` are no-ops.
#[must_use = "dropping a Subscription immediately removes the listener"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    /// Merge several subscriptions into one that tears all of them down.
    pub fn combine(subscriptions: Vec<Subscription>) -> Self {
        if subscriptions.is_empty() {
            return Self::noop();
        }
        Self::new(move || {
            for mut subscription in subscriptions {
                subscription.unsubscribe();
            }
        })
    }

    /// Whether the teardown has yet to run.
    pub fn is_active(&self) -> bool {
        self.teardown.is_some()
    }

    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_registry() -> (Rc<Listeners<u32>>, Rc<Cell<u32>>) {
        (Rc::new(Listeners::new()), Rc::new(Cell::new(0)))
    }

    #[test]
    fn test_emit_reaches_every_listener() {
        let (registry, total) = counting_registry();
        let first = Rc::clone(&total);
        let second = Rc::clone(&total);
        let _a = Listeners::subscribe(&registry, move |v| first.set(first.get() + v));
        let _b = Listeners::subscribe(&registry, move |v| second.set(second.get() + v));

        registry.emit(&3);
        assert_eq!(total.get(), 6);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let (registry, total) = counting_registry();
        let seen = Rc::clone(&total);
        let mut subscription = Listeners::subscribe(&registry, move |v| seen.set(*v));

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        assert!(registry.is_empty());

        registry.emit(&7);
        assert_eq!(total.get(), 0);
    }

    #[test]
    fn test_drop_removes_listener() {
        let (registry, _) = counting_registry();
        {
            let _subscription = Listeners::subscribe(&registry, |_| {});
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_teardown_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let mut subscription = Subscription::new(move || counter.set(counter.get() + 1));

        subscription.unsubscribe();
        drop(subscription);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let (registry, _) = counting_registry();
        let mut subscription = Listeners::subscribe(&registry, |_| {});
        drop(registry);
        subscription.unsubscribe();
    }

    #[test]
    fn test_listener_can_remove_itself_during_emit() {
        let registry: Rc<Listeners<()>> = Rc::new(Listeners::new());
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let subscription = Listeners::subscribe(&registry, move |_| {
            if let Some(mut own) = inner.borrow_mut().take() {
                own.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(subscription);

        registry.emit(&());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_combine_tears_down_all() {
        let (registry, _) = counting_registry();
        let combined = Subscription::combine(vec![
            Listeners::subscribe(&registry, |_| {}),
            Listeners::subscribe(&registry, |_| {}),
        ]);
        assert_eq!(registry.len(), 2);
        drop(combined);
        assert!(registry.is_empty());
    }
}
