//! Operating system color scheme, detected through `dark-light`.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::signal::SignalSource;
use crate::subscription::{ListenerId, Listeners};
use crate::theme::ThemePreference;

/// Function used to read the current OS color scheme.
pub type ThemeDetector = fn() -> ThemePreference;

/// `(prefers-color-scheme: dark)` backed by the operating system setting.
///
/// The OS offers no change callback, so the value is refreshed by calling
/// [`OsColorScheme::poll`] from the application's tick. [`SignalSource::matches`]
/// reports the value seen by the last detection.
pub struct OsColorScheme {
    detector: ThemeDetector,
    last: Cell<ThemePreference>,
    listeners: Listeners<bool>,
}

impl OsColorScheme {
    pub fn new() -> Self {
        Self::with_detector(os_theme_detector)
    }

    /// Uses `detector` instead of querying the OS. Useful for tests or to
    /// force a specific scheme.
    pub fn with_detector(detector: ThemeDetector) -> Self {
        let initial = detector();
        log::debug!("Detected OS color scheme: {initial}");
        Self {
            detector,
            last: Cell::new(initial),
            listeners: Listeners::new(),
        }
    }

    /// Re-detect the scheme. Returns the new scheme when it changed, after
    /// notifying listeners.
    pub fn poll(&self) -> Option<ThemePreference> {
        let current = (self.detector)();
        if self.last.replace(current) == current {
            return None;
        }
        log::info!("OS color scheme changed to {current}");
        self.listeners.emit(&current.is_dark());
        Some(current)
    }

    pub fn current(&self) -> ThemePreference {
        self.last.get()
    }
}

impl Default for OsColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OsColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsColorScheme")
            .field("last", &self.last.get())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SignalSource for OsColorScheme {
    fn matches(&self) -> bool {
        self.last.get().is_dark()
    }

    fn add_listener(&self, listener: Rc<dyn Fn(bool)>) -> ListenerId {
        self.listeners.add(Rc::new(move |value: &bool| listener(*value)))
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

fn os_theme_detector() -> ThemePreference {
    match detect_os_theme() {
        OsThemeMode::Dark => ThemePreference::Dark,
        OsThemeMode::Light => ThemePreference::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicBool, Ordering};

    static DARK: AtomicBool = AtomicBool::new(false);

    fn switchable_detector() -> ThemePreference {
        ThemePreference::from_dark(DARK.load(Ordering::SeqCst))
    }

    #[test]
    fn test_poll_emits_only_on_change() {
        DARK.store(false, Ordering::SeqCst);
        let scheme = OsColorScheme::with_detector(switchable_detector);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        scheme.add_listener(Rc::new(move |dark| sink.borrow_mut().push(dark)));

        assert_eq!(scheme.poll(), None);
        DARK.store(true, Ordering::SeqCst);
        assert_eq!(scheme.poll(), Some(ThemePreference::Dark));
        assert_eq!(scheme.poll(), None);
        assert!(scheme.matches());

        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn test_fixed_detector() {
        let scheme = OsColorScheme::with_detector(|| ThemePreference::Dark);
        assert_eq!(scheme.current(), ThemePreference::Dark);
        assert!(scheme.matches());
    }
}
