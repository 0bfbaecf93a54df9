//! Vault settings model
//!
//! Settings are a plain value: loaded once per command, passed to whatever
//! needs them, and written back explicitly. Loading and saving live in
//! [`crate::storage`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::line::{DATE_TOKEN, DEFAULT_DATE_FORMAT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Date format must contain YYYY-MM-DD, got '{0}'")]
    InvalidDateFormat(String),

    #[error("Display name is required")]
    MissingName,

    #[error("A custom note named '{0}' already exists")]
    DuplicateName(String),

    #[error("No custom note matches '{0}'")]
    UnknownCustomNote(String),
}

/// A named target note with an optional tag added to its tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomNote {
    /// Vault-relative path of the note
    pub path: String,

    /// Display name, used to pick the note from the CLI
    pub name: String,

    /// Tag(s) added to every task created in this note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl CustomNote {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = normalize_tag(&tag.into());
        self
    }
}

/// Per-vault settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Note used when no target is given
    pub default_note: Option<String>,

    /// Tag(s) added to tasks created in the default note
    pub default_tag: Option<String>,

    /// Due date template, must contain `YYYY-MM-DD`
    pub date_format: String,

    /// Reject the details field when creating tasks
    pub hide_details_field: bool,

    /// When the vault was first set up
    pub first_onboarding: Option<DateTime<Utc>>,

    /// Additional named target notes
    pub custom_notes: Vec<CustomNote>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_note: None,
            default_tag: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            hide_details_field: false,
            first_onboarding: None,
            custom_notes: Vec::new(),
        }
    }
}

impl Settings {
    /// Sets or clears the default tag
    pub fn set_default_tag(&mut self, tag: Option<&str>) {
        self.default_tag = tag.and_then(normalize_tag);
    }

    /// Sets the due date template
    pub fn set_date_format(&mut self, format: &str) -> Result<(), SettingsError> {
        if !format.contains(DATE_TOKEN) {
            return Err(SettingsError::InvalidDateFormat(format.to_string()));
        }
        self.date_format = format.to_string();
        Ok(())
    }

    /// Adds a custom note. The caller checks that the path exists.
    pub fn add_custom_note(&mut self, note: CustomNote) -> Result<(), SettingsError> {
        if note.name.trim().is_empty() {
            return Err(SettingsError::MissingName);
        }
        if self.custom_notes.iter().any(|n| n.name == note.name) {
            return Err(SettingsError::DuplicateName(note.name));
        }
        self.custom_notes.push(note);
        Ok(())
    }

    /// Finds a custom note by index or display name
    pub fn find_custom_note(&self, key: &str) -> Option<usize> {
        if let Ok(index) = key.parse::<usize>() {
            if index < self.custom_notes.len() {
                return Some(index);
            }
        }
        self.custom_notes.iter().position(|n| n.name == key)
    }

    /// Removes a custom note by index or display name
    pub fn remove_custom_note(&mut self, key: &str) -> Result<CustomNote, SettingsError> {
        let index = self
            .find_custom_note(key)
            .ok_or_else(|| SettingsError::UnknownCustomNote(key.to_string()))?;
        Ok(self.custom_notes.remove(index))
    }
}

/// Trims and strips `#` from each tag, `None` if nothing is left
fn normalize_tag(raw: &str) -> Option<String> {
    let tags = super::tags::parse_tags(raw);
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(" "))
    }
}
