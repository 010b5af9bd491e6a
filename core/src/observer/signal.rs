use std::cell::Cell;
use std::rc::Rc;

use crate::subscription::{ListenerId, Listeners};

/// A boolean environment signal with change notification, the shape of a
/// media query such as `(prefers-color-scheme: dark)`.
pub trait SignalSource {
    /// Whether the signal currently matches.
    fn matches(&self) -> bool;

    /// Register a change listener. Listeners only fire when the value changes.
    fn add_listener(&self, listener: Rc<dyn Fn(bool)>) -> ListenerId;

    /// Remove a listener. Returns false when it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// In-memory media query whose value is pushed in by the host application.
#[derive(Debug)]
pub struct MediaQuery {
    query: String,
    matches: Cell<bool>,
    listeners: Listeners<bool>,
}

impl MediaQuery {
    pub const PREFERS_DARK: &'static str = "(prefers-color-scheme: dark)";
    pub const PREFERS_REDUCED_MOTION: &'static str = "(prefers-reduced-motion: reduce)";

    pub fn new(query: impl Into<String>, matches: bool) -> Self {
        Self {
            query: query.into(),
            matches: Cell::new(matches),
            listeners: Listeners::new(),
        }
    }

    pub fn prefers_dark(matches: bool) -> Self {
        Self::new(Self::PREFERS_DARK, matches)
    }

    pub fn prefers_reduced_motion(matches: bool) -> Self {
        Self::new(Self::PREFERS_REDUCED_MOTION, matches)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the value, notifying listeners if it changed.
    pub fn set_matches(&self, matches: bool) -> bool {
        if self.matches.replace(matches) == matches {
            return false;
        }
        log::debug!("Media query {} changed to {matches}", self.query);
        self.listeners.emit(&matches);
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl SignalSource for MediaQuery {
    fn matches(&self) -> bool {
        self.matches.get()
    }

    fn add_listener(&self, listener: Rc<dyn Fn(bool)>) -> ListenerId {
        self.listeners.add(Rc::new(move |value: &bool| listener(*value)))
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
