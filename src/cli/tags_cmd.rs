//! Tag commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Context;
use super::output::Output;
use crate::domain::{current_tag_at, insert_tag, suggest, DEFAULT_SUGGESTION_LIMIT};
use crate::storage::NoteHost;

#[derive(Subcommand)]
pub enum TagsCommands {
    /// List every tag used in the vault
    List,

    /// Complete the tag under the cursor
    ///
    /// Examples:
    ///   create-task tags suggest "work pro"
    ///   create-task tags suggest "pro work" --cursor 2
    Suggest {
        /// Tag input as typed so far
        input: String,

        /// Cursor position in characters (defaults to the end)
        #[arg(long)]
        cursor: Option<usize>,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },
}

pub fn run(cmd: TagsCommands, ctx: &Context, output: &Output) -> Result<()> {
    match cmd {
        TagsCommands::List => list(ctx, output),
        TagsCommands::Suggest {
            input,
            cursor,
            limit,
        } => suggest_tags(ctx, output, &input, cursor, limit),
    }
}

fn list(ctx: &Context, output: &Output) -> Result<()> {
    let workspace = ctx.workspace()?;
    let tags = workspace.vault().tags()?;

    if output.is_json() {
        output.data(&tags);
    } else if tags.is_empty() {
        println!("No tags");
    } else {
        for tag in &tags {
            println!("#{}", tag);
        }
    }

    Ok(())
}

fn suggest_tags(
    ctx: &Context,
    output: &Output,
    input: &str,
    cursor: Option<usize>,
    limit: usize,
) -> Result<()> {
    let workspace = ctx.workspace()?;
    let available = workspace.vault().tags()?;

    let cursor = byte_offset(input, cursor);
    let partial = current_tag_at(input, cursor);
    let suggestions = suggest(&available, partial, limit);
    tracing::debug!(partial, count = suggestions.len(), "tag suggestions");

    let completions: Vec<_> = suggestions
        .iter()
        .map(|tag| {
            let (completed, _) = insert_tag(input, cursor, tag);
            serde_json::json!({ "tag": tag, "completed": completed })
        })
        .collect();

    if output.is_json() {
        output.data(&completions);
    } else if completions.is_empty() {
        println!("No matching tags");
    } else {
        for completion in &completions {
            println!(
                "#{:<24} {}",
                completion["tag"].as_str().unwrap_or_default(),
                completion["completed"].as_str().unwrap_or_default()
            );
        }
    }

    Ok(())
}

/// Converts a character cursor to a byte offset, clamped to the input
fn byte_offset(input: &str, cursor: Option<usize>) -> usize {
    match cursor {
        Some(chars) => input
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(input.len()),
        None => input.len(),
    }
}
