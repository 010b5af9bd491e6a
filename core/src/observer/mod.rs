//! # System Preference Observation
//!
//! Sources of environment signals the theme controller and the accessibility
//! facade react to:
//!
//! - **[`SignalSource`]** - media-query shaped contract: read the current value,
//!   add and remove change listeners
//! - **[`MediaQuery`]** - in-memory source whose value the host pushes in
//! - **[`OsColorScheme`]** - operating system color scheme, refreshed by polling
//! - **[`SystemPreferenceObserver`]** - typed color scheme view with
//!   disposable subscriptions
//! - **[`ModalityTracker`]** - keyboard / pointer / touch input modality

pub mod modality;
pub mod os;
pub mod signal;
pub mod system;

pub use modality::{InputModality, ModalityTracker};
pub use os::{OsColorScheme, ThemeDetector};
pub use signal::{MediaQuery, SignalSource};
pub use system::SystemPreferenceObserver;
