use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::aria::{Announcer, LiveRegion, Priority};
use super::color::{ColorIssue, ColorValidator, ContrastValidator, ThemeColors, ValidationResult};
use super::focus::{focus_trap, FocusManager, TrapOptions};
use super::keyboard::{keyboard_navigation, ElementId, FocusHost, NavigationOptions};
use super::motion::ReducedMotion;
use super::responsive::{
    animation_preset, hover_preset, AnimationPreset, DeviceCapabilityProfile, DeviceSignals,
    HoverPreset,
};
use crate::input::InputEvent;
use crate::observer::{InputModality, ModalityTracker};
use crate::subscription::Subscription;
use crate::validation::Validator;

/// Per-session accessibility state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccessibilityState {
    pub prefers_reduced_motion: bool,
    pub keyboard_navigation_active: bool,
    pub last_color_validation: Option<ValidationResult>,
}

/// Single entry point for the accessibility helpers.
///
/// The facade keeps [`AccessibilityState`] current: reduced motion follows
/// its [`ReducedMotion`] signal and keyboard navigation is considered active
/// while the input modality recorded through
/// [`record_input`](Self::record_input) is the keyboard.
pub struct Accessibility {
    state: Rc<RefCell<AccessibilityState>>,
    motion: ReducedMotion,
    modality: ModalityTracker,
    host: FocusHost,
    validator: Box<ColorValidator>,
    announcer: Rc<dyn Announcer>,
    _watchers: Vec<Subscription>,
}

impl Accessibility {
    pub fn new(host: FocusHost, motion: ReducedMotion) -> Self {
        let state = Rc::new(RefCell::new(AccessibilityState {
            prefers_reduced_motion: motion.current(),
            ..AccessibilityState::default()
        }));
        let modality = ModalityTracker::new();

        let motion_state = Rc::downgrade(&state);
        let motion_watch = motion.subscribe(move |reduce| {
            if let Some(state) = motion_state.upgrade() {
                state.borrow_mut().prefers_reduced_motion = reduce;
            }
        });
        let modality_state = Rc::downgrade(&state);
        let modality_watch = modality.subscribe(move |current| {
            if let Some(state) = modality_state.upgrade() {
                state.borrow_mut().keyboard_navigation_active = current == InputModality::Keyboard;
            }
        });

        Self {
            state,
            motion,
            modality,
            host,
            validator: Box::new(ContrastValidator::default()),
            announcer: Rc::new(LiveRegion::new()),
            _watchers: vec![motion_watch, modality_watch],
        }
    }

    pub fn with_validator(
        mut self,
        validator: impl Validator<ThemeColors, Error = Vec<ColorIssue>> + 'static,
    ) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_announcer(mut self, announcer: Rc<dyn Announcer>) -> Self {
        self.announcer = announcer;
        self
    }

    /// Snapshot of the session state.
    pub fn state(&self) -> AccessibilityState {
        self.state.borrow().clone()
    }

    /// The reduced motion signal: `current()` plus `subscribe()`.
    pub fn reduced_motion_state(&self) -> &ReducedMotion {
        &self.motion
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.state.borrow().prefers_reduced_motion
    }

    pub fn modality(&self) -> &ModalityTracker {
        &self.modality
    }

    pub fn record_input(&self, event: &InputEvent) -> InputModality {
        self.modality.record(event)
    }

    /// Validate a color set, remember the result and warn when it fails.
    pub fn validate_theme_colors(&self, colors: &ThemeColors) -> ValidationResult {
        let result = ValidationResult::from_outcome(self.validator.validate(colors));
        if !result.valid {
            let issues: Vec<String> = result.issues.iter().map(ToString::to_string).collect();
            log::warn!("Theme colors failed accessibility checks: {}", issues.join("; "));
        }
        self.state.borrow_mut().last_color_validation = Some(result.clone());
        result
    }

    pub fn last_color_validation(&self) -> Option<ValidationResult> {
        self.state.borrow().last_color_validation.clone()
    }

    pub fn keyboard_navigation(
        &self,
        elements: &[ElementId],
        options: NavigationOptions,
    ) -> Subscription {
        keyboard_navigation(&self.host, elements, options)
    }

    pub fn focus_trap(&self, container: &[ElementId], options: TrapOptions) -> Subscription {
        focus_trap(&self.host, container, options)
    }

    pub fn focus_manager(&self) -> FocusManager {
        FocusManager::new(self.host.clone())
    }

    /// Forward `message` to the announcer. `None` announces politely.
    pub fn announce(&self, message: &str, priority: impl Into<Option<Priority>>) {
        self.announcer
            .announce(message, priority.into().unwrap_or_default());
    }

    pub fn device_profile(&self, signals: &DeviceSignals) -> DeviceCapabilityProfile {
        DeviceCapabilityProfile::detect(signals)
    }

    pub fn responsive_animation(&self, signals: &DeviceSignals) -> AnimationPreset {
        animation_preset(&self.device_profile(signals), self.prefers_reduced_motion())
    }

    pub fn responsive_hover(&self, signals: &DeviceSignals) -> HoverPreset {
        hover_preset(&self.device_profile(signals), self.prefers_reduced_motion())
    }

    pub fn host(&self) -> &FocusHost {
        &self.host
    }
}

impl fmt::Debug for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessibility")
            .field("state", &self.state.borrow())
            .field("host", &self.host)
            .finish()
    }
}
