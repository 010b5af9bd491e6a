use super::{limits::*, validation::ConfigValidationError, LoggingConfig};
use lumen_core::a11y::{ContrastValidator, NavigationOptions};
use lumen_core::theme::ThemePreference;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    theme: ThemeConfig,
    #[serde(default)]
    accessibility: AccessibilityConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    watch: WatchConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Some(fallback) = self.theme.fallback.as_deref() {
            if fallback.parse::<ThemePreference>().is_err() {
                errors.push(ConfigValidationError::FallbackTheme {
                    configured: fallback.to_string(),
                });
            }
        }

        for (field, configured) in [
            ("min_text_contrast", self.accessibility.min_text_contrast()),
            ("min_ui_contrast", self.accessibility.min_ui_contrast()),
        ] {
            if !(MIN_CONTRAST_RATIO..=MAX_CONTRAST_RATIO).contains(&configured) {
                errors.push(ConfigValidationError::ContrastRatio {
                    field,
                    configured,
                    min_limit: MIN_CONTRAST_RATIO,
                    max_limit: MAX_CONTRAST_RATIO,
                });
            }
        }

        let poll_interval = self.watch.poll_interval_ms();
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&poll_interval) {
            errors.push(ConfigValidationError::PollInterval {
                configured: poll_interval,
                min_limit: MIN_POLL_INTERVAL_MS,
                max_limit: MAX_POLL_INTERVAL_MS,
            });
        }

        let level = self.logging.level().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn accessibility(&self) -> &AccessibilityConfig {
        &self.accessibility
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn watch(&self) -> &WatchConfig {
        &self.watch
    }
}

/// Theme resolution settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeConfig {
    fallback: Option<String>,
    store_path: Option<String>,
}

impl ThemeConfig {
    /// Theme used when neither a stored preference nor the OS scheme is
    /// available. Invalid values are reported by [`AppConfig::validate`].
    pub fn fallback(&self) -> ThemePreference {
        self.fallback
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Explicit preference file. `None` means the platform config directory.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path.as_deref().map(PathBuf::from)
    }
}

/// Color validation and navigation settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AccessibilityConfig {
    min_text_contrast: Option<f64>,
    min_ui_contrast: Option<f64>,
    wrap_navigation: Option<bool>,
}

impl AccessibilityConfig {
    pub fn min_text_contrast(&self) -> f64 {
        self.min_text_contrast
            .unwrap_or(ContrastValidator::DEFAULT_TEXT_CONTRAST)
    }

    pub fn min_ui_contrast(&self) -> f64 {
        self.min_ui_contrast
            .unwrap_or(ContrastValidator::DEFAULT_UI_CONTRAST)
    }

    pub fn wrap_navigation(&self) -> bool {
        self.wrap_navigation.unwrap_or(true)
    }

    pub fn contrast_validator(&self) -> ContrastValidator {
        ContrastValidator::new(self.min_text_contrast(), self.min_ui_contrast())
    }

    pub fn navigation_options(&self) -> NavigationOptions {
        NavigationOptions::default().with_wrap(self.wrap_navigation())
    }
}

/// OS color scheme watch settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct WatchConfig {
    poll_interval_ms: Option<u64>,
}

impl WatchConfig {
    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms.unwrap_or(1000)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms())
    }
}
