//! # Lumen Core Library
//!
//! Theme preference resolution and accessibility primitives for the Lumen
//! client. This library resolves the active light/dark theme from a persisted
//! preference and the system color scheme, and provides the focus, keyboard
//! navigation, motion and announcement helpers the application composes.
//!
//! Everything in this crate is single-threaded: state is shared through `Rc`
//! and `RefCell`, and every listener registration hands back a
//! [`Subscription`] that tears the listener down exactly once.
//!
//! ## Modules
//!
//! - [`theme`] - Theme preference, persisted store, presentation root and controller
//! - [`observer`] - System signal sources, color scheme observer and input modality tracking
//! - [`a11y`] - Accessibility facade: reduced motion, color validation, focus and announcements
//! - [`input`] - Keyboard and pointer input events shared by the observers and focus helpers
//! - [`subscription`] - Listener registries and disposable subscriptions
//! - [`validation`] - Validator trait shared by the color checks

pub mod a11y;
pub mod input;
pub mod observer;
pub mod subscription;
pub mod theme;
pub mod validation;

pub use a11y::Accessibility;
pub use observer::SystemPreferenceObserver;
pub use subscription::Subscription;
pub use theme::{ThemeController, ThemeError, ThemePreference, ThemeScope};
pub use validation::Validator;
