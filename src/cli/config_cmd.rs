//! Settings commands

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;

use super::app::Context;
use super::output::Output;
use crate::storage::{GlobalConfig, NoteHost, VaultError, Workspace};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the vault settings
    Show,

    /// Set the note tasks go to by default
    DefaultNote {
        /// Vault-relative path of an existing note
        #[arg(required_unless_present = "clear")]
        path: Option<String>,

        /// Unset the default note
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },

    /// Set the tag(s) added to tasks in the default note
    DefaultTag {
        /// Space-separated tags, without `#`
        #[arg(required_unless_present = "clear")]
        tag: Option<String>,

        /// Remove the default tag
        #[arg(long, conflicts_with = "tag")]
        clear: bool,
    },

    /// Set the due date template (must contain YYYY-MM-DD)
    DateFormat {
        /// e.g. "@due(YYYY-MM-DD)" or "📅 YYYY-MM-DD"
        #[arg(id = "date_format", value_name = "FORMAT")]
        format: String,
    },

    /// Refuse the details field when adding tasks
    HideDetails {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::value_parser!(bool))]
        hide: bool,
    },

    /// Remember a vault to use from outside any vault directory
    DefaultVault {
        /// Vault directory
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCommands, ctx: &Context, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(ctx, output),
        ConfigCommands::DefaultNote { path, clear } => {
            let path = if clear { None } else { path };
            default_note(ctx, output, path)
        }
        ConfigCommands::DefaultTag { tag, clear } => {
            let tag = if clear { None } else { tag };
            update(ctx, output, |workspace| {
                workspace.settings_mut().set_default_tag(tag.as_deref());
                Ok(())
            })
        }
        ConfigCommands::DateFormat { format } => update(ctx, output, |workspace| {
            workspace.settings_mut().set_date_format(&format)?;
            Ok(())
        }),
        ConfigCommands::HideDetails { hide } => update(ctx, output, |workspace| {
            workspace.settings_mut().hide_details_field = hide;
            Ok(())
        }),
        ConfigCommands::DefaultVault { path } => default_vault(output, &path),
    }
}

fn show(ctx: &Context, output: &Output) -> Result<()> {
    let workspace = ctx.workspace()?;
    let settings = workspace.settings();

    if output.is_json() {
        output.data(settings);
        return Ok(());
    }

    println!("Vault: {}", workspace.root().display());
    println!(
        "Default note: {}",
        settings.default_note.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Default tag: {}",
        settings.default_tag.as_deref().unwrap_or("(none)")
    );
    println!("Date format: {}", settings.date_format);
    println!("Hide details field: {}", settings.hide_details_field);
    println!("Custom notes: {}", settings.custom_notes.len());

    Ok(())
}

fn default_note(ctx: &Context, output: &Output, path: Option<String>) -> Result<()> {
    update(ctx, output, |workspace| {
        if let Some(path) = &path {
            match workspace.vault().resolve(path) {
                Ok(_) => {}
                Err(VaultError::NotFound(_)) => anyhow::bail!("This file doesn't exist: {}", path),
                Err(e) => return Err(e.into()),
            }
        }
        workspace.settings_mut().default_note = path.map(|p| p.trim().to_string());
        Ok(())
    })
}

/// Applies a change to the settings and saves them
fn update<F>(ctx: &Context, output: &Output, change: F) -> Result<()>
where
    F: FnOnce(&mut Workspace) -> Result<()>,
{
    let mut workspace = ctx.workspace()?;
    change(&mut workspace)?;
    workspace.save()?;

    if output.is_json() {
        output.data(workspace.settings());
    } else {
        output.success("Settings saved");
    }

    Ok(())
}

fn default_vault(output: &Output, path: &Path) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Vault directory does not exist: {}", path.display()))?;
    // Must already be a vault
    Workspace::open(&root)?;

    let mut global = GlobalConfig::load()?;
    global.default_vault = Some(root.clone());
    global.save()?;

    output.success(&format!("Default vault set to {}", root.display()));
    Ok(())
}
