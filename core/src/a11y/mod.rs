//! # Accessibility
//!
//! Helpers the interface composes to stay usable with assistive technology
//! and reduced-motion settings:
//!
//! - **[`Accessibility`]** - facade owning the session [`AccessibilityState`]
//! - **[`motion`]** - reduced motion signal
//! - **[`color`]** - WCAG contrast validation of theme colors
//! - **[`keyboard`]** - the [`FocusHost`] surface and arrow-key navigation
//! - **[`focus`]** - focus trap and focus save/restore
//! - **[`aria`]** - live-region announcements
//! - **[`responsive`]** - device capability profile and animation presets
//!
//! Every helper that registers listeners returns a
//! [`crate::Subscription`]; dropping it removes everything it registered.

pub mod aria;
pub mod color;
pub mod facade;
pub mod focus;
pub mod keyboard;
pub mod motion;
pub mod responsive;

pub use aria::{Announcement, Announcer, LiveRegion, Priority};
pub use color::{ColorIssue, ColorValidator, ContrastValidator, Rgb, ThemeColors, ValidationResult};
pub use facade::{Accessibility, AccessibilityState};
pub use focus::{focus_trap, FocusManager, TrapOptions};
pub use keyboard::{
    keyboard_navigation, ElementId, FocusHost, NavigationOptions, Orientation, WeakFocusHost,
};
pub use motion::ReducedMotion;
pub use responsive::{
    animation_preset, hover_preset, AnimationPreset, DeviceCapabilityProfile, DeviceSignals,
    HoverPreset, PerformanceTier, ScreenSize, Viewport,
};
