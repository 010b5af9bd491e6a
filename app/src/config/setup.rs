use std::path::PathBuf;
use thiserror::Error;

/// Name of the configuration file, both in the config directory and in the
/// working directory.
pub const CONFIG_FILE_NAME: &str = "lumen.toml";

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Failed to determine config directory: {0}")]
    ConfigDir(String),
}

/// Get the standard configuration directory for the current platform
pub fn get_config_dir() -> Result<PathBuf, SetupError> {
    lumen_core::theme::default_config_dir()
        .ok_or_else(|| SetupError::ConfigDir("Unable to determine config directory".to_string()))
}

/// Get the standard configuration file path
pub fn get_config_file_path() -> Result<PathBuf, SetupError> {
    let mut config_dir = get_config_dir()?;
    config_dir.push(CONFIG_FILE_NAME);
    Ok(config_dir)
}

/// Configuration files in load order. Later files override earlier ones.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    match get_config_file_path() {
        Ok(path) => candidates.push(path),
        Err(e) => log::debug!("Skipping user configuration file: {e}"),
    }
    candidates.push(PathBuf::from(CONFIG_FILE_NAME));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_directory_file_is_loaded_last() {
        let candidates = config_file_candidates();
        assert_eq!(candidates.last(), Some(&PathBuf::from(CONFIG_FILE_NAME)));
    }
}
