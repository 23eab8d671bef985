//! Files under the configuration directory: config, state and the default
//! snapshot location.

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use super::state_config::StateConfig;
use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_FILE_NAME: &str = "state.toml";
const SNAPSHOT_FILE_NAME: &str = "snapshot.json";

/// Failures reading or writing the config and state files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Owns the config directory and the files inside it.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Locates the per-user configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigDirNotFound` when no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    #[must_use]
    pub const fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Creates the configuration directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.config_dir.exists() {
            info!(path = ?self.config_dir, "creating configuration directory");
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Reads the config, writing a default file on first run.
    ///
    /// A malformed file is left untouched and defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot
    /// be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        self.ensure_config_dir()?;
        let path = path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf);

        if let Some(config) = read_toml(&path)? {
            return Ok(config);
        }
        if path.exists() {
            return Ok(AppConfig::default());
        }

        info!(path = ?path, "config file not found, writing defaults");
        let config = AppConfig::default();
        write_toml_atomically(&path, &config)?;
        Ok(config)
    }

    /// Reads the persisted state; missing or malformed files read as empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read.
    pub fn load_state(&self) -> Result<StateConfig, ConfigError> {
        Ok(read_toml(&self.state_path())?.unwrap_or_default())
    }

    /// Writes the state atomically.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_state(&self, state: &StateConfig) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        write_toml_atomically(&self.state_path(), state)
    }

    /// Records a forward destination and persists the updated state.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the state cannot be read or written.
    pub fn record_forward(&self, channel_id: &str, limit: usize) -> Result<StateConfig, ConfigError> {
        let mut state = self.load_state()?;
        state.record_forward(channel_id, limit);
        self.save_state(&state)?;
        debug!(channel = channel_id, "recorded forward destination");
        Ok(state)
    }

    /// Picks the snapshot to load.
    ///
    /// A path given on the command line is used as is. A path from the
    /// config file is relative to the config directory. Without either,
    /// `snapshot.json` in the config directory is used when it exists.
    #[must_use]
    pub fn snapshot_path(&self, explicit: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = configured {
            return Some(self.config_dir.join(path));
        }
        let fallback = self.config_dir.join(SNAPSHOT_FILE_NAME);
        fallback.exists().then_some(fallback)
    }

    fn state_path(&self) -> PathBuf {
        self.config_dir.join(STATE_FILE_NAME)
    }
}

/// Parses a TOML file. `Ok(None)` when it is missing or malformed.
fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(error = %e, path = ?path, "failed to parse file, using defaults");
            Ok(None)
        }
    }
}

fn write_toml_atomically<T: Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(data)?;

    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("path has no parent directory"))?;
    fs::create_dir_all(parent)?;
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_config_dir_creates_directory() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("teamview");
        let manager = StorageManager::with_dir(config_path.clone());

        assert!(!config_path.exists());
        manager.ensure_config_dir().unwrap();
        assert!(config_path.exists());
    }

    #[test]
    fn test_load_config_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.forward.recent_limit, 20);

        let config_file = dir.path().join(CONFIG_FILE_NAME);
        assert!(config_file.exists());
    }

    #[test]
    fn test_load_config_honours_override_path() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[ui]\ntoast_width = 30\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();

        assert_eq!(config.ui.toast_width, 30);
    }

    #[test]
    fn test_load_config_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_file, "invalid_toml = [").unwrap();

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.ui.toast_width, 60);
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "invalid_toml = [");
    }

    #[test]
    fn test_save_and_load_state() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let mut state = StateConfig::default();
        state.record_forward("town-square", 5);

        manager.save_state(&state).unwrap();

        let loaded_state = manager.load_state().unwrap();
        assert_eq!(loaded_state.recent_forward_channels, vec!["town-square"]);
    }

    #[test]
    fn test_malformed_state_resets() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(dir.path().join(STATE_FILE_NAME), "recent_forward_channels = 3").unwrap();

        let state = manager.load_state().unwrap();

        assert!(state.recent_forward_channels.is_empty());
    }

    #[test]
    fn test_record_forward_persists() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        manager.record_forward("a", 5).unwrap();
        let state = manager.record_forward("b", 5).unwrap();

        assert_eq!(state.recent_forward_channels, vec!["b", "a"]);
        assert_eq!(manager.load_state().unwrap().recent_forward_channels, vec!["b", "a"]);
    }

    #[test]
    fn test_snapshot_path_resolution() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        assert_eq!(manager.snapshot_path(None, None), None);

        assert_eq!(
            manager.snapshot_path(None, Some(Path::new("stores/team.json"))),
            Some(dir.path().join("stores/team.json"))
        );
        assert_eq!(
            manager.snapshot_path(Some(Path::new("local.json")), Some(Path::new("other.json"))),
            Some(PathBuf::from("local.json"))
        );

        fs::write(dir.path().join(SNAPSHOT_FILE_NAME), "{}").unwrap();
        assert_eq!(
            manager.snapshot_path(None, None),
            Some(dir.path().join(SNAPSHOT_FILE_NAME))
        );
    }
}
