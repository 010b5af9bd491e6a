use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::input::InputEvent;
use crate::subscription::{Listeners, Subscription};

/// How the user is currently driving the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModality {
    #[default]
    Pointer,
    Keyboard,
    Touch,
}

impl InputModality {
    /// Classify a raw input event. `None` means the event says nothing about
    /// modality (plain typing, modifier presses).
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        match event {
            InputEvent::Key(key) if key.is_navigation() => Some(InputModality::Keyboard),
            InputEvent::Key(_) => None,
            InputEvent::PointerDown | InputEvent::PointerMove => Some(InputModality::Pointer),
            InputEvent::TouchStart => Some(InputModality::Touch),
        }
    }
}

/// Tracks the input modality from the events the application feeds it.
///
/// Cloning yields another handle to the same tracker.
#[derive(Clone, Default)]
pub struct ModalityTracker {
    current: Rc<Cell<InputModality>>,
    listeners: Rc<Listeners<InputModality>>,
}

impl ModalityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> InputModality {
        self.current.get()
    }

    pub fn is_keyboard(&self) -> bool {
        self.current() == InputModality::Keyboard
    }

    /// Record an input event, notifying subscribers if the modality changed.
    pub fn record(&self, event: &InputEvent) -> InputModality {
        if let Some(modality) = InputModality::from_event(event) {
            if self.current.replace(modality) != modality {
                log::trace!("Input modality switched to {modality:?}");
                self.listeners.emit(&modality);
            }
        }
        self.current()
    }

    pub fn subscribe(&self, callback: impl Fn(InputModality) + 'static) -> Subscription {
        Listeners::subscribe(&self.listeners, move |modality| callback(*modality))
    }
}

impl fmt::Debug for ModalityTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalityTracker")
            .field("current", &self.current())
            .finish()
    }
}
