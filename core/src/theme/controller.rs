use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use super::error::ThemeError;
use super::preference::ThemePreference;
use super::presentation::PresentationRoot;
use super::store::PreferenceStore;
use crate::observer::SystemPreferenceObserver;
use crate::subscription::{Listeners, Subscription};

struct ControllerState {
    store: Box<dyn PreferenceStore>,
    root: PresentationRoot,
    active: Option<ThemePreference>,
    fallback: ThemePreference,
}

impl ControllerState {
    /// Stored preference, with read failures treated as "no preference".
    fn read_stored(&self) -> Option<ThemePreference> {
        match self.store.stored_theme() {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Ignoring unreadable theme preference: {e}");
                None
            }
        }
    }

    /// Make `theme` active and apply it. Returns true if the theme changed.
    fn activate(&mut self, theme: ThemePreference) -> bool {
        let changed = self.active != Some(theme);
        self.active = Some(theme);
        self.root.apply(theme);
        changed
    }

    fn follow_system(&mut self, scheme: ThemePreference) -> bool {
        if let Some(stored) = self.read_stored() {
            log::debug!("Ignoring system color scheme {scheme}: stored preference {stored} wins");
            return false;
        }
        let changed = self.activate(scheme);
        if changed {
            log::info!("Following system color scheme: {scheme}");
        }
        changed
    }
}

/// Owns the active theme, the presentation root and the persisted preference.
///
/// The controller is created once at application start and shared by
/// reference (usually as `Rc<ThemeController>` through a
/// [`super::ThemeScope`]). Resolution order on [`initialize`](Self::initialize)
/// is: stored preference, then system scheme, then the fallback theme.
pub struct ThemeController {
    state: Rc<RefCell<ControllerState>>,
    changes: Rc<Listeners<ThemePreference>>,
    observer: SystemPreferenceObserver,
    system_subscription: RefCell<Option<Subscription>>,
}

impl ThemeController {
    pub fn new(store: impl PreferenceStore + 'static, observer: SystemPreferenceObserver) -> Self {
        Self {
            state: Rc::new(RefCell::new(ControllerState {
                store: Box::new(store),
                root: PresentationRoot::new(),
                active: None,
                fallback: ThemePreference::default(),
            })),
            changes: Rc::new(Listeners::new()),
            observer,
            system_subscription: RefCell::new(None),
        }
    }

    /// Theme used when neither a stored preference nor a system scheme is
    /// available. Defaults to [`ThemePreference::Light`].
    pub fn with_fallback(self, fallback: ThemePreference) -> Self {
        self.state.borrow_mut().fallback = fallback;
        self
    }

    /// Resolve and apply the initial theme. Runs once per controller.
    pub fn initialize(&self) -> Result<ThemePreference, ThemeError> {
        let resolved = {
            let mut state = self.state.borrow_mut();
            if state.active.is_some() {
                return Err(ThemeError::AlreadyInitialized);
            }

            let resolved = match state.read_stored() {
                Some(stored) => {
                    log::info!("Using stored theme preference: {stored}");
                    stored
                }
                None => match self.observer.current() {
                    Some(system) => {
                        log::info!("No stored theme preference, using system color scheme: {system}");
                        system
                    }
                    None => {
                        log::info!(
                            "System color scheme unavailable, using fallback theme: {}",
                            state.fallback
                        );
                        state.fallback
                    }
                },
            };
            state.activate(resolved);
            resolved
        };

        self.changes.emit(&resolved);
        Ok(resolved)
    }

    /// Follow system color scheme changes while no explicit preference is
    /// stored. Calling it again keeps the existing subscription.
    pub fn subscribe_to_system_changes(&self) -> Result<(), ThemeError> {
        if self.active().is_none() {
            return Err(ThemeError::NotInitialized);
        }

        let mut slot = self.system_subscription.borrow_mut();
        if slot.as_ref().is_some_and(Subscription::is_active) {
            return Ok(());
        }
        if !self.observer.is_supported() {
            log::debug!("System color scheme signal unavailable, not subscribing");
        }

        let state = Rc::downgrade(&self.state);
        let changes = Rc::downgrade(&self.changes);
        *slot = Some(self.observer.subscribe(move |scheme| {
            let Some(state) = state.upgrade() else {
                return;
            };
            let changed = state.borrow_mut().follow_system(scheme);
            if changed {
                if let Some(changes) = changes.upgrade() {
                    changes.emit(&scheme);
                }
            }
        }));
        Ok(())
    }

    /// [`initialize`](Self::initialize) followed by
    /// [`subscribe_to_system_changes`](Self::subscribe_to_system_changes).
    pub fn bootstrap(&self) -> Result<ThemePreference, ThemeError> {
        let theme = self.initialize()?;
        self.subscribe_to_system_changes()?;
        Ok(theme)
    }

    /// Stop following system changes.
    pub fn unsubscribe_from_system_changes(&self) {
        if let Some(mut subscription) = self.system_subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_following_system(&self) -> bool {
        self.system_subscription
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Flip the active theme, apply it and persist it.
    pub fn toggle(&self) -> Result<ThemePreference, ThemeError> {
        let next = self.active().ok_or(ThemeError::NotInitialized)?.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Make `theme` active, apply it and persist it.
    ///
    /// If persisting fails the theme stays applied and the store error is
    /// returned.
    pub fn set(&self, theme: ThemePreference) -> Result<(), ThemeError> {
        let (changed, persisted) = {
            let mut state = self.state.borrow_mut();
            if state.active.is_none() {
                return Err(ThemeError::NotInitialized);
            }
            let changed = state.activate(theme);
            (changed, state.store.store_theme(theme))
        };

        if changed {
            log::info!("Theme set to {theme}");
            self.changes.emit(&theme);
        }

        persisted.map_err(|e| {
            log::error!("Failed to persist theme preference {theme}: {e}");
            ThemeError::from(e)
        })
    }

    /// Parse a theme name and [`set`](Self::set) it.
    pub fn set_from_str(&self, name: &str) -> Result<ThemePreference, ThemeError> {
        let theme = name.parse()?;
        self.set(theme)?;
        Ok(theme)
    }

    /// The active theme, `None` before initialization.
    pub fn active(&self) -> Option<ThemePreference> {
        self.state.borrow().active
    }

    /// The theme in the persisted store, if any.
    pub fn stored(&self) -> Option<ThemePreference> {
        self.state.borrow().read_stored()
    }

    pub fn fallback(&self) -> ThemePreference {
        self.state.borrow().fallback
    }

    /// Notify `callback` after every change of the active theme.
    pub fn watch(&self, callback: impl Fn(ThemePreference) + 'static) -> Subscription {
        Listeners::subscribe(&self.changes, move |theme| callback(*theme))
    }

    /// Read access to the presentation root. Only the controller writes it.
    pub fn presentation(&self) -> Ref<'_, PresentationRoot> {
        Ref::map(self.state.borrow(), |state| &state.root)
    }
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("active", &self.active())
            .field("following_system", &self.is_following_system())
            .field("observer", &self.observer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::MediaQuery;
    use crate::theme::store::MemoryPreferenceStore;
    use crate::theme::StoreError;
    use claims::{assert_matches, assert_ok, assert_ok_eq};
    use std::cell::Cell;

    fn controller_with(
        stored: Option<ThemePreference>,
        system_dark: bool,
    ) -> (ThemeController, MemoryPreferenceStore, Rc<MediaQuery>) {
        let store = stored
            .map(MemoryPreferenceStore::with_theme)
            .unwrap_or_default();
        let query = Rc::new(MediaQuery::prefers_dark(system_dark));
        let controller = ThemeController::new(
            store.clone(),
            SystemPreferenceObserver::new(query.clone()),
        );
        (controller, store, query)
    }

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn stored_theme(&self) -> Result<Option<ThemePreference>, StoreError> {
            Err(StoreError::NoConfigDir)
        }

        fn store_theme(&self, _theme: ThemePreference) -> Result<(), StoreError> {
            Err(StoreError::NoConfigDir)
        }
    }

    #[test]
    fn test_operations_before_initialize_fail() {
        let (controller, _, _) = controller_with(None, false);
        assert_matches!(controller.toggle(), Err(ThemeError::NotInitialized));
        assert_matches!(
            controller.set(ThemePreference::Dark),
            Err(ThemeError::NotInitialized)
        );
        assert_matches!(
            controller.subscribe_to_system_changes(),
            Err(ThemeError::NotInitialized)
        );
        assert_eq!(controller.active(), None);
    }

    #[test]
    fn test_initialize_runs_once() {
        let (controller, _, _) = controller_with(None, true);
        assert_ok_eq!(controller.initialize(), ThemePreference::Dark);
        assert_matches!(controller.initialize(), Err(ThemeError::AlreadyInitialized));
    }

    #[test]
    fn test_fallback_without_system_capability() {
        let controller =
            ThemeController::new(MemoryPreferenceStore::new(), SystemPreferenceObserver::unsupported())
                .with_fallback(ThemePreference::Dark);
        assert_ok_eq!(controller.bootstrap(), ThemePreference::Dark);
        assert!(!controller.is_following_system());
    }

    #[test]
    fn test_unreadable_store_falls_back_to_system() {
        let query = Rc::new(MediaQuery::prefers_dark(true));
        let controller = ThemeController::new(FailingStore, SystemPreferenceObserver::new(query));
        assert_ok_eq!(controller.initialize(), ThemePreference::Dark);
    }

    #[test]
    fn test_persist_failure_keeps_theme_applied() {
        let controller = ThemeController::new(FailingStore, SystemPreferenceObserver::unsupported());
        assert_ok!(controller.initialize());

        assert_matches!(
            controller.set(ThemePreference::Dark),
            Err(ThemeError::Store(StoreError::NoConfigDir))
        );
        assert_eq!(controller.active(), Some(ThemePreference::Dark));
        assert_eq!(
            controller.presentation().attribute(PresentationRoot::THEME_ATTRIBUTE),
            Some("dark")
        );
    }

    #[test]
    fn test_set_from_str_rejects_unknown_names() {
        let (controller, store, _) = controller_with(None, false);
        assert_ok!(controller.initialize());
        assert_matches!(
            controller.set_from_str("solarized"),
            Err(ThemeError::UnknownTheme(name)) if name == "solarized"
        );
        assert_eq!(store.get(), None);
        assert_ok_eq!(controller.set_from_str("Dark"), ThemePreference::Dark);
    }

    #[test]
    fn test_system_changes_followed_until_explicit_choice() {
        let (controller, _, query) = controller_with(None, false);
        assert_ok!(controller.bootstrap());

        query.set_matches(true);
        assert_eq!(controller.active(), Some(ThemePreference::Dark));

        assert_ok!(controller.set(ThemePreference::Light));
        query.set_matches(false);
        query.set_matches(true);
        assert_eq!(controller.active(), Some(ThemePreference::Light));
    }

    #[test]
    fn test_subscribe_twice_keeps_one_listener() {
        let (controller, _, query) = controller_with(None, false);
        assert_ok!(controller.bootstrap());
        assert_ok!(controller.subscribe_to_system_changes());
        assert_eq!(query.listener_count(), 1);

        controller.unsubscribe_from_system_changes();
        assert_eq!(query.listener_count(), 0);
        assert!(!controller.is_following_system());
    }

    #[test]
    fn test_drop_releases_system_listener() {
        let (controller, _, query) = controller_with(None, false);
        assert_ok!(controller.bootstrap());
        drop(controller);
        assert_eq!(query.listener_count(), 0);
    }

    #[test]
    fn test_watch_reports_changes_only() {
        let (controller, _, query) = controller_with(None, false);
        assert_ok!(controller.bootstrap());

        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        let _watch = controller.watch(move |_| counter.set(counter.get() + 1));

        assert_ok!(controller.set(ThemePreference::Light));
        assert_eq!(changes.get(), 0);
        assert_ok!(controller.toggle());
        assert_eq!(changes.get(), 1);

        // Stored preference now exists, so this is ignored.
        query.set_matches(true);
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_watch_callback_can_read_controller() {
        let (controller, _, _) = controller_with(None, false);
        let controller = Rc::new(controller);
        assert_ok!(controller.initialize());

        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        let weak = Rc::downgrade(&controller);
        let _watch = controller.watch(move |_| {
            if let Some(controller) = weak.upgrade() {
                sink.set(controller.active());
            }
        });

        assert_ok!(controller.toggle());
        assert_eq!(seen.get(), Some(ThemePreference::Dark));
    }
}
