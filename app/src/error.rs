use lumen_core::theme::{StoreError, ThemeError};
use std::fmt::Display;

/// Application-wide error type for the `lumen` command-line front end.
///
/// Library errors from `lumen-core` are flattened into string payloads so the
/// type stays `Clone` and easy to compare in tests.
///
/// # Error Categories
///
/// - [`AppError::Config`] - configuration loading and validation failures
/// - [`AppError::Theme`] - theme controller and preference store failures
/// - [`AppError::Io`] - file system and terminal output failures
/// - [`AppError::Logging`] - logger installation failures
/// - [`AppError::Input`] - invalid command-line input
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Config(String),
    Theme(String),
    Io(String),
    Logging(String),
    Input(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Theme(msg) => write!(f, "Theme Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
            AppError::Logging(msg) => write!(f, "Logging Error: {msg}"),
            AppError::Input(msg) => write!(f, "Input Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        AppError::Theme(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Theme(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Io(format!("failed to encode JSON output: {err}"))
    }
}

impl From<log::SetLoggerError> for AppError {
    fn from(err: log::SetLoggerError) -> Self {
        AppError::Logging(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_error_conversion() {
        let err: AppError = ThemeError::UnknownTheme("sepia".to_string()).into();
        assert!(matches!(err, AppError::Theme(_)));
        assert!(err.to_string().starts_with("Theme Error:"));
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AppError = io.into();
        assert_eq!(err, AppError::Io("read-only".to_string()));
    }
}
