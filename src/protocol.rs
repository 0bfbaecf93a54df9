//! `create-task` URL handler
//!
//! Other apps can hand over a task as a URL such as
//!
//! ```text
//! obsidian://create-task?create=true&note-path=Inbox.md&task-description=Call%20Bob&due-date=friday
//! ```
//!
//! With `create=true` and an existing `note-path` the task is written
//! straight away. Anything else is returned for review: the caller shows the
//! prefilled task instead of writing it.

use thiserror::Error;
use url::Url;

use crate::create::TaskInput;
use crate::domain::Target;
use crate::storage::NoteHost;

/// URL action this handler responds to
pub const ACTION: &str = "create-task";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported action '{0}', expected 'create-task'")]
    UnsupportedAction(String),
}

/// Parameters carried by a `create-task` URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolRequest {
    pub create: bool,
    pub note_path: Option<String>,
    pub task_description: Option<String>,
    pub due_date: Option<String>,
    pub task_details: Option<String>,
}

impl ProtocolRequest {
    /// Parses a `create-task` URL. Unknown parameters are ignored.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let url = Url::parse(raw.trim()).map_err(|e| ProtocolError::InvalidUrl(e.to_string()))?;

        let action = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => url.path().trim_matches('/').to_string(),
        };
        if action != ACTION {
            return Err(ProtocolError::UnsupportedAction(action));
        }

        let mut request = Self::default();
        for (key, value) in url.query_pairs() {
            let value = value.into_owned();
            match key.as_ref() {
                "create" => request.create = value == "true",
                "note-path" => request.note_path = Some(value).filter(|v| !v.is_empty()),
                "task-description" => request.task_description = Some(value),
                "due-date" => request.due_date = Some(value),
                "task-details" => request.task_details = Some(value),
                other => tracing::debug!(param = other, "ignoring URL parameter"),
            }
        }

        Ok(request)
    }

    /// The form fields carried by the URL
    pub fn input(&self) -> TaskInput {
        TaskInput {
            description: self.task_description.clone().unwrap_or_default(),
            tags: None,
            due_date: self.due_date.clone().unwrap_or_default(),
            details: self.task_details.clone().unwrap_or_default(),
        }
    }

    /// The note the URL points at, or the default note
    pub fn target(&self) -> Target {
        match &self.note_path {
            Some(path) => Target::Path(path.clone()),
            None => Target::Default,
        }
    }
}

/// What to do with a parsed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolAction {
    /// Write the task to the named note now
    Create { target: Target, input: TaskInput },

    /// Show the prefilled task for the user to confirm
    Review { target: Target, input: TaskInput },
}

/// Decides whether a request can be written directly.
///
/// Direct creation needs `create=true` and a `note-path` that exists in the
/// vault.
pub fn dispatch<H: NoteHost + ?Sized>(request: &ProtocolRequest, host: &H) -> ProtocolAction {
    let target = request.target();
    let input = request.input();

    let note_exists = request
        .note_path
        .as_deref()
        .is_some_and(|path| host.resolve(path).is_ok());

    if request.create && note_exists {
        ProtocolAction::Create { target, input }
    } else {
        ProtocolAction::Review { target, input }
    }
}
