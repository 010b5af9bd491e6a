//! Persisted theme preference stores.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::error::StoreError;
use super::preference::ThemePreference;

/// Synchronous read/write access to the persisted theme preference.
///
/// `Ok(None)` from [`PreferenceStore::stored_theme`] means the user never
/// made an explicit choice; the controller then follows the system scheme.
pub trait PreferenceStore {
    fn stored_theme(&self) -> Result<Option<ThemePreference>, StoreError>;

    fn store_theme(&self, theme: ThemePreference) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same slot, which lets tests hand one
/// clone to a controller and keep another to inspect or to build a second
/// controller that simulates a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    slot: Rc<Cell<Option<ThemePreference>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: ThemePreference) -> Self {
        let store = Self::new();
        store.slot.set(Some(theme));
        store
    }

    /// Current slot value, bypassing the `Result` of the trait.
    pub fn get(&self) -> Option<ThemePreference> {
        self.slot.get()
    }

    pub fn clear(&self) {
        self.slot.set(None);
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn stored_theme(&self) -> Result<Option<ThemePreference>, StoreError> {
        Ok(self.slot.get())
    }

    fn store_theme(&self, theme: ThemePreference) -> Result<(), StoreError> {
        self.slot.set(Some(theme));
        Ok(())
    }
}

/// Store backed by a small TOML document:
///
/// ```toml
/// theme = "dark"
/// ```
///
/// Keys other than `theme` are preserved on write. A missing file reads as
/// "no stored preference".
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

const THEME_KEY: &str = "theme";

impl FilePreferenceStore {
    pub const FILE_NAME: &'static str = "preferences.toml";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located at `<config dir>/lumen/preferences.toml`.
    pub fn in_config_dir() -> Result<Self, StoreError> {
        let mut path = default_config_dir().ok_or(StoreError::NoConfigDir)?;
        path.push(Self::FILE_NAME);
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Option<toml::Table>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        content
            .parse::<toml::Table>()
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn stored_theme(&self) -> Result<Option<ThemePreference>, StoreError> {
        let Some(table) = self.read_table()? else {
            return Ok(None);
        };

        match table.get(THEME_KEY) {
            None => Ok(None),
            Some(toml::Value::String(value)) => {
                value
                    .parse()
                    .map(Some)
                    .map_err(|_| StoreError::InvalidValue {
                        path: self.path.clone(),
                        value: value.clone(),
                    })
            }
            Some(other) => Err(StoreError::InvalidValue {
                path: self.path.clone(),
                value: other.to_string(),
            }),
        }
    }

    fn store_theme(&self, theme: ThemePreference) -> Result<(), StoreError> {
        // An unreadable document is replaced rather than blocking the write.
        let mut table = match self.read_table() {
            Ok(table) => table.unwrap_or_default(),
            Err(e) => {
                log::warn!("Replacing unreadable preference file: {e}");
                toml::Table::new()
            }
        };
        table.insert(
            THEME_KEY.to_string(),
            toml::Value::String(theme.as_str().to_string()),
        );

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let content = toml::to_string(&table)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Stored theme preference '{theme}' in {}", self.path.display());
        Ok(())
    }
}

/// Prefer `~/.config/lumen` on Unix-like systems, fall back to the platform
/// config directory elsewhere.
pub fn default_config_dir() -> Option<PathBuf> {
    if cfg!(unix) {
        if let Some(mut home) = dirs::home_dir() {
            home.push(".config");
            home.push("lumen");
            return Some(home);
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push("lumen");
        path
    })
}
