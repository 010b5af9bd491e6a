use crate::error::{AppError, AppResult};
use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub mod app;
pub mod limits;
pub mod setup;
pub mod validation;

pub use app::{AccessibilityConfig, AppConfig, ThemeConfig, WatchConfig};
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Prefix of environment overrides, e.g. `LUMEN__THEME__FALLBACK=dark`.
pub const ENV_PREFIX: &str = "LUMEN";

/// Global configuration loading and access
static CONFIG: OnceCell<ConfigLoadResult> = OnceCell::new();

/// Sources merged into an [`AppConfig`], lowest priority first.
#[derive(Debug, Default, Clone)]
pub struct ConfigSources {
    /// Optional TOML files; missing files are skipped.
    pub files: Vec<PathBuf>,
    /// Environment snapshot to read overrides from. `None` reads the process
    /// environment.
    pub env: Option<HashMap<String, String>>,
}

impl ConfigSources {
    /// User config directory, then the working directory, then `extra`.
    pub fn standard(extra: Option<PathBuf>) -> Self {
        let mut files = setup::config_file_candidates();
        files.extend(extra);
        Self { files, env: None }
    }
}

pub fn load_config_from(sources: ConfigSources) -> ConfigLoadResult {
    let mut builder = Config::builder();
    for path in &sources.files {
        log::debug!("Reading configuration file {}", path.display());
        builder = builder.add_source(File::from(path.as_path()).required(false));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(sources.env),
    );

    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your lumen.toml file and LUMEN__ environment variables."
            ));
        }
    };

    let app_config = match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(e) => {
            return ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}"));
        }
    };

    if let Err(validation_errors) = app_config.validate() {
        let error_messages: Vec<String> =
            validation_errors.iter().map(|e| e.user_message()).collect();
        return ConfigLoadResult::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n\n")
        ));
    }

    ConfigLoadResult::Success(Box::new(app_config))
}

fn load_config(extra: Option<PathBuf>) -> ConfigLoadResult {
    dotenv::dotenv().ok();
    load_config_from(ConfigSources::standard(extra))
}

/// Load the global configuration, adding `extra` as the highest priority
/// file. Only the first call loads; later calls return the cached result.
pub fn init_config(extra: Option<PathBuf>) -> &'static ConfigLoadResult {
    CONFIG.get_or_init(|| load_config(extra))
}

impl ConfigLoadResult {
    pub fn as_result(&self) -> AppResult<&AppConfig> {
        match self {
            ConfigLoadResult::Success(config) => Ok(config.as_ref()),
            ConfigLoadResult::LoadError(e)
            | ConfigLoadResult::DeserializeError(e)
            | ConfigLoadResult::ValidationError(e) => Err(AppError::Config(e.clone())),
        }
    }
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
