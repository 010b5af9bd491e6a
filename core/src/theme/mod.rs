//! # Theme System Module
//!
//! Resolution, application and persistence of the light/dark theme.
//!
//! ## Architecture
//!
//! - **[`ThemeController`]** - resolves the initial theme, applies it to the
//!   [`PresentationRoot`] and exposes toggle/set
//! - **[`PreferenceStore`]** - persisted preference contract, with
//!   [`MemoryPreferenceStore`] and [`FilePreferenceStore`] implementations
//! - **[`ThemeScope`]** - explicit provisioning of the single controller
//! - **[`ThemePreference`]** - the two-valued theme enum
//!
//! ## Resolution Order
//!
//! 1. A stored preference always wins.
//! 2. Without one, the system color scheme is used and followed on change.
//! 3. Without a system signal, the fallback theme (light unless configured).
//!
//! ## Basic Usage
//!
//! ```no_run
//! use lumen_core::observer::{OsColorScheme, SystemPreferenceObserver};
//! use lumen_core::theme::{FilePreferenceStore, ThemeController, ThemeScope};
//! use std::rc::Rc;
//!
//! let os = Rc::new(OsColorScheme::new());
//! let store = FilePreferenceStore::in_config_dir()?;
//! let controller = ThemeController::new(store, SystemPreferenceObserver::new(os.clone()));
//! controller.bootstrap()?;
//!
//! let scope = ThemeScope::provide(controller);
//! scope.use_theme()?.toggle()?;
//!
//! // Later, from the application tick:
//! os.poll();
//! ```

pub mod controller;
pub mod error;
pub mod preference;
pub mod presentation;
pub mod scope;
pub mod store;

pub use controller::ThemeController;
pub use error::{StoreError, ThemeError};
pub use preference::ThemePreference;
pub use presentation::PresentationRoot;
pub use scope::ThemeScope;
pub use store::{default_config_dir, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
