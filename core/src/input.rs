//! Input events fed into the modality tracker and the focus host.

use std::cell::Cell;

/// Keys the focus helpers react to. Anything else arrives as [`Key::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Space,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Shift,
    Control,
    Alt,
    Meta,
    Char(char),
}

impl Key {
    /// Keys that move or act on focus and therefore indicate keyboard use.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Key::Tab
                | Key::Enter
                | Key::Space
                | Key::Escape
                | Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
        )
    }

    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }
}

/// A key press dispatched through a [`crate::a11y::FocusHost`].
///
/// Listeners that handle the key call [`KeyEvent::prevent_default`] so the
/// host can report the press as consumed.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    key: Key,
    shift: bool,
    default_prevented: Cell<bool>,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            default_prevented: Cell::new(false),
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Raw input observed by the application, used to infer input modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    PointerDown,
    PointerMove,
    TouchStart,
}
