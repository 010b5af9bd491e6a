use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid theme.fallback: '{configured}' (expected 'light' or 'dark')")]
    FallbackTheme { configured: String },
    #[error("Invalid accessibility.{field}: {configured} (min: {min_limit}, max: {max_limit})")]
    ContrastRatio {
        field: &'static str,
        configured: f64,
        min_limit: f64,
        max_limit: f64,
    },
    #[error("Invalid watch.poll_interval_ms: {configured} (min: {min_limit}, max: {max_limit})")]
    PollInterval {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid logging.level: '{configured}'")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::FallbackTheme { configured } => {
                format!(
                    "Unknown fallback theme!\n\n\
                    Your configured value: {configured}\n\
                    Valid values: light, dark\n\n\
                    Please update theme.fallback in lumen.toml."
                )
            }
            ConfigValidationError::ContrastRatio {
                field,
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Contrast ratio out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update accessibility.{field} in lumen.toml to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::PollInterval {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Color scheme polling interval out of range!\n\n\
                    Your configured value: {configured} ms\n\
                    Valid range: {min_limit} - {max_limit} ms\n\n\
                    Please update watch.poll_interval_ms in lumen.toml."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown log level!\n\n\
                    Your configured value: {configured}\n\
                    Valid values: off, error, warn, info, debug, trace\n\n\
                    Please update logging.level in lumen.toml."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug, Clone)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
    ValidationError(String),
}
