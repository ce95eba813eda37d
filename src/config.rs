//! Configuration management for the generator.
//!
//! This module handles loading, validating, and saving generator settings
//! in TOML format with platform-specific directory resolution. Settings only
//! decide where the document goes and how much the run logs; the document's
//! content comes entirely from the compiled-in declarations.

use crate::constants::{APP_NAME, OUTPUT_FILE_NAME};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the settings file inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Log levels accepted in `[logging] level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Where the generated document is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file; relative paths resolve against the working directory
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(OUTPUT_FILE_NAME),
        }
    }
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Generator configuration.
///
/// # File Location
///
/// - Linux: `~/.config/hyperkey/config.toml`
/// - macOS: `~/Library/Application Support/hyperkey/config.toml`
/// - Windows: `%APPDATA%\hyperkey\config.toml`
///
/// A missing file means defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from the platform config file.
    ///
    /// If the file doesn't exist, or the platform has no config directory,
    /// returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_in(dirs::config_dir())
    }

    /// Loads `hyperkey/config.toml` under `config_root`, defaulting when no
    /// root is known.
    pub fn load_in(config_root: Option<PathBuf>) -> Result<Self> {
        match config_root {
            Some(root) => Self::load_from(&root.join(APP_NAME).join(CONFIG_FILE_NAME)),
            None => Ok(Self::new()),
        }
    }

    /// Loads configuration from `config_path`, defaulting when it is absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the platform config file.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `config_path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `output.path` is non-empty
    /// - `logging.level` is a known level
    pub fn validate(&self) -> Result<()> {
        if self.output.path.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Unknown log level '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.output.path, PathBuf::from("karabiner.json"));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_level() {
        let mut config = Config::new();
        config.logging.level = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_config_validate_empty_path() {
        let mut config = Config::new();
        config.output.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_load_without_config_root_gives_defaults() {
        assert_eq!(Config::load_in(None).unwrap(), Config::new());
    }

    #[test]
    fn test_load_in_reads_app_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        let app_dir = temp_dir.path().join("hyperkey");
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join("config.toml"), "[logging]\nlevel = \"error\"\n").unwrap();

        let loaded = Config::load_in(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(loaded.logging.level, "error");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.output.path = PathBuf::from("out/karabiner.json");
        config.logging.level = "debug".to_string();
        config.save_to(&config_file).unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
        assert!(!temp_dir.path().join("config.toml.tmp").exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[logging]\nlevel = \"warn\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.logging.level, "warn");
        assert_eq!(loaded.output.path, PathBuf::from("karabiner.json"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "output = [").unwrap();

        assert!(Config::load_from(&config_file).is_err());
    }
}
