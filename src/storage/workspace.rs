//! Vault workspace
//!
//! Handles vault initialization and discovery, and pairs the vault with its
//! settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use thiserror::Error;

use super::config::{self, GlobalConfig, STATE_DIR};
use super::vault::FsVault;
use crate::domain::Settings;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a create-task vault. Run 'create-task init' first.")]
    NotInVault,

    #[error("Vault directory does not exist: {0}")]
    MissingDirectory(PathBuf),
}

/// A vault directory plus its settings
pub struct Workspace {
    root: PathBuf,
    settings: Settings,
}

impl Workspace {
    /// Opens an existing vault at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.join(STATE_DIR).is_dir() {
            return Err(WorkspaceError::NotInVault.into());
        }

        let settings = config::load_settings(&root)?;
        tracing::debug!(root = %root.display(), "opened vault");

        Ok(Self { root, settings })
    }

    /// Finds the vault to work in.
    ///
    /// An explicit path wins; otherwise the current directory and its parents
    /// are searched, then the global `default_vault`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(root) = explicit {
            return Self::open(root);
        }

        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        if let Some(root) = config::find_vault_root(&cwd) {
            return Self::open(root);
        }

        match GlobalConfig::load()?.default_vault {
            Some(root) => Self::open(root),
            None => Err(WorkspaceError::NotInVault.into()),
        }
    }

    /// Initializes a vault at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(WorkspaceError::MissingDirectory(root).into());
        }

        let state_dir = root.join(STATE_DIR);
        fs::create_dir_all(&state_dir).with_context(|| {
            format!("Failed to create {} directory: {}", STATE_DIR, state_dir.display())
        })?;

        let mut settings = config::load_settings(&root)?;
        if settings.first_onboarding.is_none() {
            settings.first_onboarding = Some(Utc::now());
            config::save_settings(&root, &settings)?;
            tracing::info!(root = %root.display(), "initialized vault");
        }

        Self::open(root)
    }

    /// Returns the vault root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.create-task` directory path
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    /// Returns the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a mutable reference to the settings
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Writes the settings back to disk
    pub fn save(&self) -> Result<()> {
        config::save_settings(&self.root, &self.settings)
    }

    /// Returns the note store for this vault
    pub fn vault(&self) -> FsVault {
        FsVault::new(&self.root)
    }
}
