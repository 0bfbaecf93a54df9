//! # Storage Layer
//!
//! Everything that touches the disk: the vault of notes, the settings file
//! and the global config.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Notes | Markdown, append-only | anywhere in the vault |
//! | Settings | TOML | `<vault>/.create-task/config.toml` |
//! | Global config | TOML | `~/.config/create-task/config.toml` |
//!
//! ## Concurrency Safety
//!
//! [`FsVault`] takes an exclusive `fs2` lock on a note while appending to it.
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point: vault root plus settings
//! - [`NoteHost`] - Capabilities needed to create tasks (resolve, append, tags)
//! - [`FsVault`] - [`NoteHost`] over a directory

mod config;
mod vault;
mod workspace;

pub use config::{
    find_vault_root, load_settings, save_settings, settings_path, ConfigError, GlobalConfig,
    CONFIG_DIR_ENV, STATE_DIR,
};
pub use vault::{extract_tags, FsVault, NoteHandle, NoteHost, VaultError};
pub use workspace::{Workspace, WorkspaceError};
