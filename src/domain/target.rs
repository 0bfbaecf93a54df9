//! Target note selection
//!
//! A task goes to the default note, one of the configured custom notes, or an
//! explicit note path. Each choice carries the note-level tag that gets
//! merged in front of the user's tags.

use std::fmt;

use thiserror::Error;

use super::settings::Settings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("No default note configured. Run 'create-task config default-note <path>' first.")]
    NoDefaultNote,

    #[error("Custom note #{0} does not exist")]
    UnknownCustomNote(usize),
}

/// Where a task should be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Default,
    Custom(usize),
    Path(String),
}

impl Target {
    /// Interprets a CLI target string against the configured notes.
    ///
    /// `default` (or nothing) is the default note, an index or display name
    /// selects a custom note, anything else is taken as a note path. A bare
    /// number always means a custom note index, even when out of range.
    pub fn parse(value: Option<&str>, settings: &Settings) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("default") => Target::Default,
            Some(key) => match settings.find_custom_note(key) {
                Some(index) => Target::Custom(index),
                None => match key.parse::<usize>() {
                    Ok(index) => Target::Custom(index),
                    Err(_) => Target::Path(key.to_string()),
                },
            },
        }
    }

    /// Resolves the note path and note-level tag
    pub fn resolve(&self, settings: &Settings) -> Result<ResolvedTarget, TargetError> {
        match self {
            Target::Default => {
                let path = settings
                    .default_note
                    .clone()
                    .filter(|p| !p.is_empty())
                    .ok_or(TargetError::NoDefaultNote)?;
                Ok(ResolvedTarget {
                    path,
                    note_tag: settings.default_tag.clone(),
                })
            }
            Target::Custom(index) => {
                let note = settings
                    .custom_notes
                    .get(*index)
                    .ok_or(TargetError::UnknownCustomNote(*index))?;
                Ok(ResolvedTarget {
                    path: note.path.clone(),
                    note_tag: note.tag.clone(),
                })
            }
            Target::Path(path) => Ok(ResolvedTarget {
                path: path.clone(),
                note_tag: None,
            }),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Default => write!(f, "default"),
            Target::Custom(index) => write!(f, "custom #{}", index),
            Target::Path(path) => write!(f, "{}", path),
        }
    }
}

/// A target with its settings looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: String,
    pub note_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CustomNote;

    fn settings() -> Settings {
        let mut settings = Settings {
            default_note: Some("Inbox.md".to_string()),
            default_tag: Some("inbox".to_string()),
            ..Settings::default()
        };
        settings
            .add_custom_note(CustomNote::new("Projects/Work.md", "Work").with_tag("work"))
            .unwrap();
        settings
    }

    #[test]
    fn parse_targets() {
        let settings = settings();
        assert_eq!(Target::parse(None, &settings), Target::Default);
        assert_eq!(Target::parse(Some("default"), &settings), Target::Default);
        assert_eq!(Target::parse(Some("0"), &settings), Target::Custom(0));
        assert_eq!(Target::parse(Some("Work"), &settings), Target::Custom(0));
        assert_eq!(
            Target::parse(Some("Other.md"), &settings),
            Target::Path("Other.md".to_string())
        );
    }

    #[test]
    fn out_of_range_index_is_unknown_custom_note() {
        let settings = settings();
        let target = Target::parse(Some("5"), &settings);
        assert_eq!(target, Target::Custom(5));
        assert_eq!(
            target.resolve(&settings),
            Err(TargetError::UnknownCustomNote(5))
        );
    }

    #[test]
    fn resolve_default_carries_default_tag() {
        let resolved = Target::Default.resolve(&settings()).unwrap();
        assert_eq!(resolved.path, "Inbox.md");
        assert_eq!(resolved.note_tag.as_deref(), Some("inbox"));
    }

    #[test]
    fn resolve_custom_carries_note_tag() {
        let resolved = Target::Custom(0).resolve(&settings()).unwrap();
        assert_eq!(resolved.path, "Projects/Work.md");
        assert_eq!(resolved.note_tag.as_deref(), Some("work"));
    }

    #[test]
    fn resolve_path_has_no_tag() {
        let resolved = Target::Path("Other.md".to_string())
            .resolve(&settings())
            .unwrap();
        assert_eq!(resolved.path, "Other.md");
        assert!(resolved.note_tag.is_none());
    }

    #[test]
    fn resolve_errors() {
        assert_eq!(
            Target::Default.resolve(&Settings::default()),
            Err(TargetError::NoDefaultNote)
        );
        assert_eq!(
            Target::Custom(3).resolve(&settings()),
            Err(TargetError::UnknownCustomNote(3))
        );
    }
}
