//! Theme color validation against WCAG contrast requirements.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::Validator;

/// Colors of a theme, as `#rgb` or `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub foreground: String,
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
}

impl ThemeColors {
    pub fn new(
        background: impl Into<String>,
        foreground: impl Into<String>,
        primary: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            foreground: foreground.into(),
            primary: primary.into(),
            secondary: None,
            accent: None,
            border: None,
        }
    }

    pub fn with_secondary(mut self, color: impl Into<String>) -> Self {
        self.secondary = Some(color.into());
        self
    }

    pub fn with_accent(mut self, color: impl Into<String>) -> Self {
        self.accent = Some(color.into());
        self
    }

    pub fn with_border(mut self, color: impl Into<String>) -> Self {
        self.border = Some(color.into());
        self
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
                Some(Self {
                    r: channel(0)?,
                    g: channel(1)?,
                    b: channel(2)?,
                })
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self {
                    r: channel(0)?,
                    g: channel(2)?,
                    b: channel(4)?,
                })
            }
            _ => None,
        }
    }

    /// WCAG relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG contrast ratio in `1.0..=21.0`, independent of argument order.
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

/// A single problem found in a [`ThemeColors`] set.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorIssue {
    #[error("{role} color '{value}' is not a valid hex color")]
    InvalidColor { role: String, value: String },
    #[error("{foreground} on {background} has contrast {ratio:.2}:1, needs at least {required:.1}:1")]
    LowContrast {
        foreground: String,
        background: String,
        ratio: f64,
        required: f64,
    },
}

/// Outcome of validating a color set. Invalid sets are not errors: the
/// caller decides whether to act on the issues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<ColorIssue>,
}

impl ValidationResult {
    pub fn from_outcome(outcome: Result<(), Vec<ColorIssue>>) -> Self {
        match outcome {
            Ok(()) => Self {
                valid: true,
                issues: Vec::new(),
            },
            Err(issues) => Self {
                valid: issues.is_empty(),
                issues,
            },
        }
    }
}

/// Validator type the accessibility facade accepts for color checks.
pub type ColorValidator = dyn Validator<ThemeColors, Error = Vec<ColorIssue>>;

/// Checks that every color parses and that text and UI colors reach the
/// WCAG AA contrast ratios against the background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastValidator {
    min_text_contrast: f64,
    min_ui_contrast: f64,
}

impl ContrastValidator {
    /// WCAG AA for normal text.
    pub const DEFAULT_TEXT_CONTRAST: f64 = 4.5;
    /// WCAG AA for non-text UI components.
    pub const DEFAULT_UI_CONTRAST: f64 = 3.0;

    pub fn new(min_text_contrast: f64, min_ui_contrast: f64) -> Self {
        Self {
            min_text_contrast,
            min_ui_contrast,
        }
    }

    pub fn min_text_contrast(&self) -> f64 {
        self.min_text_contrast
    }

    pub fn min_ui_contrast(&self) -> f64 {
        self.min_ui_contrast
    }
}

impl Default for ContrastValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEXT_CONTRAST, Self::DEFAULT_UI_CONTRAST)
    }
}

fn parse_role(role: &str, value: &str, issues: &mut Vec<ColorIssue>) -> Option<Rgb> {
    let parsed = Rgb::parse_hex(value);
    if parsed.is_none() {
        issues.push(ColorIssue::InvalidColor {
            role: role.to_string(),
            value: value.to_string(),
        });
    }
    parsed
}

impl Validator<ThemeColors> for ContrastValidator {
    type Error = Vec<ColorIssue>;

    fn validate(&self, input: &ThemeColors) -> Result<(), Self::Error> {
        let mut issues = Vec::new();

        let background = parse_role("background", &input.background, &mut issues);
        let foreground = parse_role("foreground", &input.foreground, &mut issues);
        let primary = parse_role("primary", &input.primary, &mut issues);
        let secondary = input
            .secondary
            .as_deref()
            .and_then(|value| parse_role("secondary", value, &mut issues));
        let accent = input
            .accent
            .as_deref()
            .and_then(|value| parse_role("accent", value, &mut issues));
        if let Some(border) = input.border.as_deref() {
            parse_role("border", border, &mut issues);
        }

        if let Some(background) = background {
            let pairs = [
                ("foreground", foreground, self.min_text_contrast),
                ("primary", primary, self.min_ui_contrast),
                ("secondary", secondary, self.min_ui_contrast),
                ("accent", accent, self.min_ui_contrast),
            ];
            for (role, color, required) in pairs {
                let Some(color) = color else { continue };
                let ratio = color.contrast_ratio(background);
                if ratio < required {
                    issues.push(ColorIssue::LowContrast {
                        foreground: role.to_string(),
                        background: "background".to_string(),
                        ratio,
                        required,
                    });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}
