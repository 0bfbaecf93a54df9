//! Task creation
//!
//! Resolves where a task goes, merges the note's tag with the user's tags,
//! compiles the line and appends it through a [`NoteHost`].

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    compile_line, merge_tags, parse_due_date, Settings, Target, TargetError, TaskLineRequest,
};
use crate::storage::{NoteHost, VaultError};

#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// What the user typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub description: String,
    pub tags: Option<String>,
    pub due_date: String,
    pub details: String,
}

/// A compiled task that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedTask {
    /// Vault-relative note path
    pub path: String,

    /// Effective tags, note tag first
    pub tags: Vec<String>,

    /// Compiled line, without trailing newline
    pub line: String,

    /// Parsed due date, if the text was understood
    pub due_date: Option<NaiveDate>,
}

/// A task that was appended to a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedTask {
    pub path: String,
    pub line: String,
}

/// Resolves the target and compiles the line without touching any note
pub fn prepare(
    settings: &Settings,
    target: &Target,
    input: &TaskInput,
    today: NaiveDate,
) -> Result<PreparedTask, CreateError> {
    let resolved = target.resolve(settings)?;
    let tags = merge_tags(resolved.note_tag.as_deref(), input.tags.as_deref());

    let request = TaskLineRequest {
        tags: tags.clone(),
        description: input.description.clone(),
        due_date_text: input.due_date.clone(),
        details: input.details.clone(),
        date_format: settings.date_format.clone(),
    };

    let due_date = if input.due_date.is_empty() {
        None
    } else {
        let parsed = parse_due_date(&input.due_date, today);
        if parsed.is_none() {
            tracing::debug!(due = %input.due_date, "due date not understood, omitting it");
        }
        parsed
    };

    Ok(PreparedTask {
        path: resolved.path,
        tags,
        line: compile_line(&request, today),
        due_date,
    })
}

/// Compiles a task and appends it, followed by a newline, to its note
pub fn create_task<H: NoteHost + ?Sized>(
    host: &H,
    settings: &Settings,
    target: &Target,
    input: &TaskInput,
    today: NaiveDate,
) -> Result<CreatedTask, CreateError> {
    let prepared = prepare(settings, target, input, today)?;

    let note = match host.resolve(&prepared.path) {
        Ok(note) => note,
        Err(VaultError::NotFound(path)) => return Err(CreateError::NoteNotFound(path)),
        Err(e) => return Err(e.into()),
    };

    host.append(&note, &format!("{}\n", prepared.line))?;
    tracing::info!(note = %note.path, %target, "created task");

    Ok(CreatedTask {
        path: prepared.path,
        line: prepared.line,
    })
}
