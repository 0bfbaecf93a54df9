//! Configuration handling for create-task
//!
//! Vault settings are stored in `<vault>/.create-task/config.toml`. A global
//! `~/.config/create-task/config.toml` can name a default vault for use
//! outside any vault directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Settings;

/// Directory inside a vault holding create-task state
pub const STATE_DIR: &str = ".create-task";

/// Overrides the global config directory
pub const CONFIG_DIR_ENV: &str = "CREATE_TASK_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Vault used when the current directory is not inside one
    pub default_vault: Option<PathBuf>,
}

/// Returns the settings file path for a vault
pub fn settings_path(vault_root: &Path) -> PathBuf {
    vault_root.join(STATE_DIR).join("config.toml")
}

/// Loads vault settings, falling back to defaults when the file is missing
pub fn load_settings(vault_root: &Path) -> Result<Settings> {
    let path = settings_path(vault_root);
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::Parse(e.to_string()))
        .with_context(|| format!("Failed to parse settings: {}", path.display()))
}

/// Writes vault settings
pub fn save_settings(vault_root: &Path, settings: &Settings) -> Result<()> {
    let path = settings_path(vault_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(&path, content)
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

impl GlobalConfig {
    /// Returns the global config directory
    pub fn dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("dev", "create-task", "create-task")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load() -> Result<Self> {
        let config_dir = match Self::dir() {
            Some(dir) => dir,
            None => return Ok(Self::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Saves the global configuration
    pub fn save(&self) -> Result<()> {
        let config_dir =
            Self::dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize global config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write global config: {}", config_path.display()))
    }
}

/// Finds the vault root by looking for a `.create-task/` directory in `start`
/// or any parent
pub fn find_vault_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(STATE_DIR).is_dir() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}
