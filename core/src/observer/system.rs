use std::fmt;
use std::rc::Rc;

use super::signal::SignalSource;
use crate::subscription::Subscription;
use crate::theme::ThemePreference;

/// Read-now and subscribe-for-change access to the system color scheme.
///
/// An observer built with [`SystemPreferenceObserver::unsupported`] stands
/// for an environment without the capability: [`current`](Self::current)
/// returns `None` and subscriptions are no-ops.
#[derive(Clone)]
pub struct SystemPreferenceObserver {
    source: Option<Rc<dyn SignalSource>>,
}

impl SystemPreferenceObserver {
    pub fn new(source: Rc<dyn SignalSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub fn unsupported() -> Self {
        Self { source: None }
    }

    pub fn is_supported(&self) -> bool {
        self.source.is_some()
    }

    /// The scheme the system reports right now.
    pub fn current(&self) -> Option<ThemePreference> {
        self.source
            .as_ref()
            .map(|source| ThemePreference::from_dark(source.matches()))
    }

    /// Call `callback` with the new scheme whenever the system scheme changes.
    pub fn subscribe(&self, callback: impl Fn(ThemePreference) + 'static) -> Subscription {
        let Some(source) = &self.source else {
            return Subscription::noop();
        };

        let id = source.add_listener(Rc::new(move |dark| {
            callback(ThemePreference::from_dark(dark))
        }));
        let source = Rc::downgrade(source);
        Subscription::new(move || {
            if let Some(source) = source.upgrade() {
                source.remove_listener(id);
            }
        })
    }
}

impl fmt::Debug for SystemPreferenceObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemPreferenceObserver")
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::MediaQuery;
    use std::cell::RefCell;

    #[test]
    fn test_current_follows_source() {
        let query = Rc::new(MediaQuery::prefers_dark(true));
        let observer = SystemPreferenceObserver::new(query.clone());
        assert_eq!(observer.current(), Some(ThemePreference::Dark));

        query.set_matches(false);
        assert_eq!(observer.current(), Some(ThemePreference::Light));
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let query = Rc::new(MediaQuery::prefers_dark(false));
        let observer = SystemPreferenceObserver::new(query.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut subscription = observer.subscribe(move |theme| sink.borrow_mut().push(theme));
        query.set_matches(true);
        subscription.unsubscribe();
        subscription.unsubscribe();
        query.set_matches(false);

        assert_eq!(*seen.borrow(), vec![ThemePreference::Dark]);
        assert_eq!(query.listener_count(), 0);
    }

    #[test]
    fn test_unsupported_environment_is_noop() {
        let observer = SystemPreferenceObserver::unsupported();
        assert!(!observer.is_supported());
        assert_eq!(observer.current(), None);

        let mut subscription = observer.subscribe(|_| panic!("must never fire"));
        assert!(!subscription.is_active());
        subscription.unsubscribe();
    }
}
