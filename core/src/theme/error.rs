use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the theme controller and its scope.
///
/// [`ThemeError::MissingProvider`], [`ThemeError::NotInitialized`] and
/// [`ThemeError::AlreadyInitialized`] signal a broken calling contract rather
/// than a runtime condition; callers are expected to surface them, not to
/// retry.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme controller requested outside of a theme scope; provide a controller first")]
    MissingProvider,
    #[error("theme controller is not initialized; call initialize() first")]
    NotInitialized,
    #[error("theme controller is already initialized")]
    AlreadyInitialized,
    #[error("unknown theme '{0}' (expected 'light' or 'dark')")]
    UnknownTheme(String),
    #[error("failed to persist theme preference: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by persisted preference stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to determine config directory")]
    NoConfigDir,
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse preference file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("preference file {path} holds an invalid theme value '{value}'")]
    InvalidValue { path: PathBuf, value: String },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_wraps_into_theme_error() {
        let err: ThemeError = StoreError::NoConfigDir.into();
        let msg = err.to_string();
        assert!(msg.contains("persist"));
        assert!(msg.contains("config directory"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = StoreError::InvalidValue {
            path: PathBuf::from("/tmp/preferences.toml"),
            value: "sepia".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("preferences.toml"));
        assert!(msg.contains("sepia"));
    }
}
