use super::write_report;
use crate::cli::{ColorArgs, NavigateArgs, ProfileArgs};
use crate::config::AccessibilityConfig;
use crate::error::{AppError, AppResult};
use lumen_core::a11y::{
    Accessibility, AnimationPreset, DeviceCapabilityProfile, DeviceSignals, ElementId, FocusHost,
    HoverPreset, ReducedMotion, ThemeColors, ValidationResult, Viewport,
};
use lumen_core::input::{InputEvent, Key, KeyEvent};
use lumen_core::observer::MediaQuery;
use serde::Serialize;
use std::cell::Cell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

#[derive(Serialize)]
struct ColorReport<'a> {
    colors: &'a ThemeColors,
    min_text_contrast: f64,
    min_ui_contrast: f64,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

impl fmt::Display for ColorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.result.valid {
            return writeln!(
                f,
                "Colors meet contrast requirements (text {}:1, UI {}:1)",
                self.min_text_contrast, self.min_ui_contrast
            );
        }
        writeln!(f, "Found {} color issue(s):", self.result.issues.len())?;
        for issue in &self.result.issues {
            writeln!(f, "  - {issue}")?;
        }
        Ok(())
    }
}

/// Validate a color set with the configured contrast thresholds.
pub fn check_colors(
    config: &AccessibilityConfig,
    args: &ColorArgs,
    json: bool,
    out: &mut dyn Write,
) -> AppResult<ValidationResult> {
    let mut colors = ThemeColors::new(&args.background, &args.foreground, &args.primary);
    if let Some(secondary) = &args.secondary {
        colors = colors.with_secondary(secondary);
    }
    if let Some(accent) = &args.accent {
        colors = colors.with_accent(accent);
    }
    if let Some(border) = &args.border {
        colors = colors.with_border(border);
    }

    let a11y = Accessibility::new(FocusHost::new(), ReducedMotion::unsupported())
        .with_validator(config.contrast_validator());
    let result = a11y.validate_theme_colors(&colors);

    write_report(
        out,
        json,
        &ColorReport {
            colors: &colors,
            min_text_contrast: config.min_text_contrast(),
            min_ui_contrast: config.min_ui_contrast(),
            result: &result,
        },
    )?;
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub signals: DeviceSignals,
    pub reduced_motion: bool,
    pub profile: DeviceCapabilityProfile,
    pub animation: AnimationPreset,
    pub hover: HoverPreset,
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = &self.profile;
        writeln!(
            f,
            "Screen: {:?} ({}x{})",
            profile.screen_size, self.signals.viewport.width, self.signals.viewport.height
        )?;
        writeln!(f, "Performance tier: {:?}", profile.tier)?;
        writeln!(
            f,
            "Touch device: {}, mobile: {}",
            profile.is_touch_device, profile.is_mobile
        )?;
        writeln!(f, "Reduced motion: {}", self.reduced_motion)?;
        writeln!(
            f,
            "Animation: scale {}, {} ms, stagger {} ms",
            self.animation.scale, self.animation.duration_ms, self.animation.stagger_ms
        )?;
        if self.hover.enabled {
            writeln!(
                f,
                "Hover: scale {}, lift {} px",
                self.hover.scale, self.hover.lift_px
            )
        } else {
            writeln!(f, "Hover: disabled")
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|threads| threads.get())
        .unwrap_or(1)
}

/// Profile the described device and derive its animation presets.
pub fn profile(args: &ProfileArgs, json: bool, out: &mut dyn Write) -> AppResult<ProfileReport> {
    let signals = DeviceSignals {
        viewport: Viewport {
            width: args.width,
            height: args.height,
        },
        modality: args.modality.into(),
        max_touch_points: args.touch_points,
        hardware_threads: args.threads.unwrap_or_else(available_threads),
        device_memory_gb: args.memory_gb,
    };
    let motion = ReducedMotion::new(Rc::new(MediaQuery::prefers_reduced_motion(
        args.reduced_motion,
    )));
    let a11y = Accessibility::new(FocusHost::new(), motion);

    let report = ProfileReport {
        signals,
        reduced_motion: a11y.prefers_reduced_motion(),
        profile: a11y.device_profile(&signals),
        animation: a11y.responsive_animation(&signals),
        hover: a11y.responsive_hover(&signals),
    };
    write_report(out, json, &report)?;
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationStep {
    pub key: String,
    pub focused: Option<String>,
    pub handled: bool,
    pub activated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationReport {
    pub items: Vec<String>,
    pub wrap: bool,
    pub steps: Vec<NavigationStep>,
}

impl fmt::Display for NavigationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start: {}", self.items.first().map_or("-", String::as_str))?;
        for step in &self.steps {
            let focused = step.focused.as_deref().unwrap_or("-");
            let suffix = if step.activated {
                " (activated)"
            } else if !step.handled {
                " (ignored)"
            } else {
                ""
            };
            writeln!(f, "{:>6} -> {focused}{suffix}", step.key)?;
        }
        Ok(())
    }
}

/// Register `args.items`, focus the first one and replay `args.keys`
/// through arrow-key navigation.
pub fn navigate(
    config: &AccessibilityConfig,
    args: &NavigateArgs,
    json: bool,
    out: &mut dyn Write,
) -> AppResult<NavigationReport> {
    if args.items.is_empty() {
        return Err(AppError::Input("at least one item is required".to_string()));
    }

    let host = FocusHost::new();
    let a11y = Accessibility::new(host.clone(), ReducedMotion::unsupported());
    let ids: Vec<ElementId> = args.items.iter().map(|label| host.register(label)).collect();
    host.focus(ids[0]);

    let activated = Rc::new(Cell::new(None));
    let sink = Rc::clone(&activated);
    let options = config
        .navigation_options()
        .with_orientation(args.orientation.into())
        .on_activate(move |id| sink.set(Some(id)));
    let _navigation = a11y.keyboard_navigation(&ids, options);

    let steps = args
        .keys
        .iter()
        .map(|nav_key| {
            let key = Key::from(*nav_key);
            a11y.record_input(&InputEvent::Key(key));
            let handled = host.dispatch_key(&KeyEvent::new(key));
            NavigationStep {
                key: format!("{nav_key:?}").to_lowercase(),
                focused: host.focused().and_then(|id| host.label(id)),
                handled,
                activated: activated.take().is_some(),
            }
        })
        .collect();

    let report = NavigationReport {
        items: args.items.clone(),
        wrap: config.wrap_navigation(),
        steps,
    };
    log::debug!(
        "Replayed {} keys, keyboard navigation active: {}",
        report.steps.len(),
        a11y.state().keyboard_navigation_active
    );
    write_report(out, json, &report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ModalityArg, NavKey, OrientationArg};
    use crate::config::AppConfig;

    fn colors(background: &str, foreground: &str, primary: &str) -> ColorArgs {
        ColorArgs {
            background: background.to_string(),
            foreground: foreground.to_string(),
            primary: primary.to_string(),
            secondary: None,
            accent: None,
            border: None,
        }
    }

    #[test]
    fn test_check_colors_reports_issues() {
        let config = AppConfig::default();
        let mut out = Vec::new();
        let result = check_colors(
            config.accessibility(),
            &colors("#ffffff", "#777777", "nope"),
            false,
            &mut out,
        )
        .unwrap();

        assert!(!result.valid);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&format!("Found {} color issue(s):", result.issues.len())));
        assert!(text.contains("nope"));
    }

    #[test]
    fn test_check_colors_json_flattens_result() {
        let config = AppConfig::default();
        let mut out = Vec::new();
        check_colors(
            config.accessibility(),
            &colors("#000000", "#ffffff", "#4da3ff"),
            true,
            &mut out,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["min_text_contrast"], 4.5);
        assert_eq!(value["colors"]["background"], "#000000");
    }

    #[test]
    fn test_profile_with_reduced_motion() {
        let args = ProfileArgs {
            width: 390,
            height: 844,
            touch_points: 5,
            threads: Some(6),
            memory_gb: Some(4.0),
            modality: ModalityArg::Touch,
            reduced_motion: true,
        };
        let report = profile(&args, false, &mut Vec::new()).unwrap();
        assert!(report.profile.is_mobile);
        assert_eq!(report.animation, AnimationPreset::STATIC);
        assert!(!report.hover.enabled);
    }

    #[test]
    fn test_navigate_wraps_and_activates() {
        let config = AppConfig::default();
        let args = NavigateArgs {
            items: vec!["Home".into(), "Pricing".into(), "About".into()],
            keys: vec![NavKey::Up, NavKey::Right, NavKey::Home, NavKey::Enter],
            orientation: OrientationArg::Vertical,
        };
        let report = navigate(config.accessibility(), &args, false, &mut Vec::new()).unwrap();

        let focused: Vec<_> = report
            .steps
            .iter()
            .map(|step| step.focused.as_deref())
            .collect();
        assert_eq!(
            focused,
            vec![Some("About"), Some("About"), Some("Home"), Some("Home")]
        );
        assert!(!report.steps[1].handled);
        assert!(report.steps[3].activated);
    }
}
