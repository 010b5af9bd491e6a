use std::fmt;
use std::rc::Rc;

use crate::observer::SignalSource;
use crate::subscription::Subscription;

/// The `(prefers-reduced-motion: reduce)` signal.
///
/// Same read-now plus subscribe shape as
/// [`crate::observer::SystemPreferenceObserver`]. Without a signal source the
/// user is assumed not to prefer reduced motion.
#[derive(Clone)]
pub struct ReducedMotion {
    source: Option<Rc<dyn SignalSource>>,
}

impl ReducedMotion {
    pub fn new(source: Rc<dyn SignalSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub fn unsupported() -> Self {
        Self { source: None }
    }

    pub fn current(&self) -> bool {
        self.source.as_ref().is_some_and(|source| source.matches())
    }

    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        let Some(source) = &self.source else {
            return Subscription::noop();
        };

        let id = source.add_listener(Rc::new(callback));
        let source = Rc::downgrade(source);
        Subscription::new(move || {
            if let Some(source) = source.upgrade() {
                source.remove_listener(id);
            }
        })
    }
}

impl fmt::Debug for ReducedMotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducedMotion")
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::MediaQuery;
    use std::cell::Cell;

    #[test]
    fn test_reduced_motion_tracks_query() {
        let query = Rc::new(MediaQuery::prefers_reduced_motion(false));
        let motion = ReducedMotion::new(query.clone());
        let last = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last);
        let mut subscription = motion.subscribe(move |reduce| sink.set(Some(reduce)));

        query.set_matches(true);
        assert!(motion.current());
        assert_eq!(last.get(), Some(true));

        subscription.unsubscribe();
        assert_eq!(query.listener_count(), 0);
    }

    #[test]
    fn test_unsupported_defaults_to_full_motion() {
        let motion = ReducedMotion::unsupported();
        assert!(!motion.current());
        assert!(!motion.subscribe(|_| {}).is_active());
    }
}
