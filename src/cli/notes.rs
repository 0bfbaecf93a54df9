//! Custom note commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Context;
use super::output::Output;
use crate::domain::CustomNote;
use crate::storage::{NoteHost, VaultError};

#[derive(Subcommand)]
pub enum NotesCommands {
    /// List the default and custom notes
    List,

    /// Add a custom note
    ///
    /// Examples:
    ///   create-task notes add Projects/Work.md Work --tag work
    Add {
        /// Vault-relative path of an existing note
        path: String,

        /// Display name used with `add --to`
        name: String,

        /// Tag(s) added to every task in this note
        #[arg(long)]
        tag: Option<String>,
    },

    /// Remove a custom note by index or name
    Remove {
        /// Index or display name
        note: String,
    },
}

pub fn run(cmd: NotesCommands, ctx: &Context, output: &Output) -> Result<()> {
    match cmd {
        NotesCommands::List => list(ctx, output),
        NotesCommands::Add { path, name, tag } => add(ctx, output, &path, &name, tag.as_deref()),
        NotesCommands::Remove { note } => remove(ctx, output, &note),
    }
}

fn list(ctx: &Context, output: &Output) -> Result<()> {
    let workspace = ctx.workspace()?;
    let settings = workspace.settings();

    if output.is_json() {
        output.data(&serde_json::json!({
            "default": {
                "path": settings.default_note,
                "tag": settings.default_tag,
            },
            "custom": settings.custom_notes,
        }));
        return Ok(());
    }

    println!("{:<6} {:<20} {:<30} TAG", "INDEX", "NAME", "PATH");
    println!("{}", "-".repeat(70));
    println!(
        "{:<6} {:<20} {:<30} {}",
        "-",
        "Default",
        settings.default_note.as_deref().unwrap_or("(not set)"),
        settings.default_tag.as_deref().unwrap_or("")
    );
    for (index, note) in settings.custom_notes.iter().enumerate() {
        println!(
            "{:<6} {:<20} {:<30} {}",
            index,
            note.name,
            note.path,
            note.tag.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

fn add(ctx: &Context, output: &Output, path: &str, name: &str, tag: Option<&str>) -> Result<()> {
    let mut workspace = ctx.workspace()?;

    match workspace.vault().resolve(path) {
        Ok(_) => {}
        Err(VaultError::NotFound(_)) => anyhow::bail!("This file doesn't exist: {}", path),
        Err(e) => return Err(e.into()),
    }

    let mut note = CustomNote::new(path.trim(), name.trim());
    if let Some(tag) = tag {
        note = note.with_tag(tag);
    }

    workspace.settings_mut().add_custom_note(note.clone())?;
    workspace.save()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "index": workspace.settings().custom_notes.len() - 1,
            "note": note,
        }));
    } else {
        output.success(&format!("Added custom note '{}' ({})", note.name, note.path));
    }

    Ok(())
}

fn remove(ctx: &Context, output: &Output, key: &str) -> Result<()> {
    let mut workspace = ctx.workspace()?;

    let removed = workspace.settings_mut().remove_custom_note(key)?;
    workspace.save()?;

    if output.is_json() {
        output.data(&serde_json::json!({ "removed": removed }));
    } else {
        output.success(&format!("Removed custom note '{}'", removed.name));
    }

    Ok(())
}
