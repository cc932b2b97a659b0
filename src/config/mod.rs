//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including file locations, theme and hotkey preferences, and log verbosity.

mod error;
pub mod hotkeys;

pub use error::ConfigError;
pub use hotkeys::{Hotkey, HotkeyAction, Hotkeys};

use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const STATE_FILE_NAME: &str = "state.json";
const DEFAULT_DIRECTORY_PATH: &str = ".config/checklist-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub theme_name: String,
    pub checklist_file: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
    pub resume_on_enter: bool,
    pub log_level: String,
    pub hotkeys: BTreeMap<HotkeyAction, Vec<Hotkey>>,
    file_path: Option<PathBuf>,
    created: bool,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default)]
    pub checklist_file: Option<PathBuf>,
    #[serde(default)]
    pub state_file: Option<PathBuf>,
    #[serde(default)]
    pub resume_on_enter: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub hotkeys: BTreeMap<HotkeyAction, Vec<Hotkey>>,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config {
            theme_name: default_theme_name(),
            checklist_file: None,
            state_file: None,
            resume_on_enter: false,
            log_level: default_log_level(),
            hotkeys: BTreeMap::new(),
            file_path: None,
            created: false,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. If no file exists yet, one is written with the
    /// current values.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => PathBuf::from(path),
            None => Config::default_path()?,
        };
        let file_path = dir_path.join(FILE_NAME);
        self.file_path = Some(file_path.clone());
        self.created = !file_path.exists();

        if self.created {
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::ReadFailed {
            path: file_path.clone(),
            source: e,
        })?;
        self.apply_yaml(&contents)
            .map_err(|message| ConfigError::InvalidFile {
                path: file_path,
                message,
            })?;
        Ok(())
    }

    /// Return the path of the loaded configuration file, if any.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Return true if the last load wrote a fresh default file.
    ///
    pub fn was_created(&self) -> bool {
        self.created
    }

    /// Overwrite values with those found in a YAML document.
    ///
    fn apply_yaml(&mut self, contents: &str) -> Result<(), String> {
        let data: FileSpec = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
        self.theme_name = data.theme_name;
        self.checklist_file = data.checklist_file;
        self.state_file = data.state_file;
        self.resume_on_enter = data.resume_on_enter;
        self.log_level = data.log_level;
        self.hotkeys = data.hotkeys;
        Ok(())
    }

    /// Save the current configuration to disk, creating its directory first.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            theme_name: self.theme_name.clone(),
            checklist_file: self.checklist_file.clone(),
            state_file: self.state_file.clone(),
            resume_on_enter: self.resume_on_enter,
            log_level: self.log_level.clone(),
            hotkeys: self.hotkeys.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        write_file(file_path, &content)?;
        Ok(())
    }

    /// Return the path of the persisted item statuses: the configured one, or
    /// a file next to the configuration.
    ///
    pub fn state_file_path(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.state_file {
            return Ok(path.clone());
        }
        let dir_path = match self.file_path.as_ref().and_then(|p| p.parent()) {
            Some(parent) => parent.to_path_buf(),
            None => Config::default_path()?,
        };
        Ok(dir_path.join(STATE_FILE_NAME))
    }

    /// Return the configured log level, defaulting to info when unknown.
    ///
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Directory holding the configuration when none is given on the command
    /// line.
    ///
    fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_DIRECTORY_PATH))
            .ok_or(ConfigError::HomeDirectoryNotFound)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
    let write_failed = |source| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::write(path, content).map_err(write_failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().join("cfg");
        let mut config = Config::new();
        config.load(dir_path.to_str()).unwrap();

        assert!(dir_path.join(FILE_NAME).exists());
        assert_eq!(config.theme_name, "tokyo-night");
        assert!(!config.resume_on_enter);
        assert_eq!(config.state_file_path().unwrap(), dir_path.join(STATE_FILE_NAME));
    }

    #[test]
    fn test_was_created_only_on_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        assert!(!config.was_created());

        config.load(dir.path().to_str()).unwrap();
        assert!(config.was_created());
        assert_eq!(config.file_path(), Some(dir.path().join(FILE_NAME).as_path()));

        let mut reloaded = Config::new();
        reloaded.load(dir.path().to_str()).unwrap();
        assert!(!reloaded.was_created());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "theme_name: rose-pine-dawn\nresume_on_enter: true\nlog_level: debug\nstate_file: /tmp/custom.json\nhotkeys:\n  toggle_item: [x]\n",
        )
        .unwrap();

        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.theme_name, "rose-pine-dawn");
        assert!(config.resume_on_enter);
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
        assert_eq!(
            config.state_file_path().unwrap(),
            PathBuf::from("/tmp/custom.json")
        );
        assert_eq!(
            config.hotkeys.get(&HotkeyAction::ToggleItem),
            Some(&vec![Hotkey::char('x')])
        );
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "hotkeys:\n  toggle_item: [ctrl+]\n").unwrap();
        let mut config = Config::new();
        let result = config.load(dir.path().to_str());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidFile { .. }))
        ));
    }

    #[test]
    fn test_save_without_path() {
        let config = Config::new();
        assert!(matches!(
            config.save(),
            Err(AppError::Config(ConfigError::FilePathNotSet))
        ));
    }

    #[test]
    fn test_unknown_log_level_defaults_to_info() {
        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::new()
        };
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
    }
}
