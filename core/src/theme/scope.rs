use std::rc::Rc;

use super::controller::ThemeController;
use super::error::ThemeError;

/// Explicit provisioning scope for the theme controller.
///
/// The application builds one controller at startup and places it in a scope
/// that it passes to whatever needs the theme. Asking an empty scope for the
/// controller is a programming error and fails fast with
/// [`ThemeError::MissingProvider`].
#[derive(Debug, Clone, Default)]
pub struct ThemeScope {
    controller: Option<Rc<ThemeController>>,
}

impl ThemeScope {
    pub fn provide(controller: ThemeController) -> Self {
        Self {
            controller: Some(Rc::new(controller)),
        }
    }

    /// A scope with no controller, e.g. for components rendered outside the
    /// application shell.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_provided(&self) -> bool {
        self.controller.is_some()
    }

    /// The scoped controller.
    pub fn use_theme(&self) -> Result<Rc<ThemeController>, ThemeError> {
        self.controller.clone().ok_or_else(|| {
            log::error!("Theme controller requested outside of a theme scope");
            ThemeError::MissingProvider
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::SystemPreferenceObserver;
    use crate::theme::store::MemoryPreferenceStore;
    use crate::theme::ThemePreference;
    use claims::{assert_matches, assert_ok};

    #[test]
    fn test_empty_scope_fails_fast() {
        let scope = ThemeScope::empty();
        assert!(!scope.is_provided());
        assert_matches!(scope.use_theme(), Err(ThemeError::MissingProvider));
    }

    #[test]
    fn test_clones_share_one_controller() {
        let scope = ThemeScope::provide(ThemeController::new(
            MemoryPreferenceStore::new(),
            SystemPreferenceObserver::unsupported(),
        ));
        let other = scope.clone();

        let controller = scope.use_theme().unwrap();
        assert_ok!(controller.initialize());
        assert_ok!(controller.toggle());

        assert_eq!(
            other.use_theme().unwrap().active(),
            Some(ThemePreference::Dark)
        );
    }
}
