//! Note vault access
//!
//! [`NoteHost`] is everything task creation needs from the place notes live:
//! look a note up, append text to it, and list the tags already in use.
//! [`FsVault`] implements it over a directory of markdown files.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Invalid note path: {0}")]
    InvalidPath(String),

    #[error("Failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A note that exists in the vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteHandle {
    /// Vault-relative path, as the user wrote it
    pub path: String,

    /// Location on disk
    pub location: PathBuf,
}

/// Capabilities task creation needs from the note store
pub trait NoteHost {
    /// Looks up an existing note by vault-relative path
    fn resolve(&self, path: &str) -> Result<NoteHandle, VaultError>;

    /// Appends text verbatim to the end of a note
    fn append(&self, note: &NoteHandle, text: &str) -> Result<(), VaultError>;

    /// All tags used in the vault, without `#`, sorted
    fn tags(&self) -> Result<Vec<String>, VaultError>;
}

/// A vault backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a vault-relative path to disk, refusing anything that would
    /// leave the vault
    fn locate(&self, path: &str) -> Result<PathBuf, VaultError> {
        let relative = Path::new(path.trim());
        if relative.as_os_str().is_empty() {
            return Err(VaultError::InvalidPath(path.to_string()));
        }

        let mut location = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => location.push(part),
                Component::CurDir => {}
                _ => return Err(VaultError::InvalidPath(path.to_string())),
            }
        }
        Ok(location)
    }

    fn collect_tags(&self, dir: &Path, tags: &mut BTreeSet<String>) -> Result<(), VaultError> {
        let entries = fs::read_dir(dir).map_err(|source| VaultError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');

            if path.is_dir() {
                if !hidden {
                    self.collect_tags(&path, tags)?;
                }
            } else if path.extension().is_some_and(|e| e == "md") {
                let content = fs::read_to_string(&path).map_err(|source| VaultError::Io {
                    path: path.clone(),
                    source,
                })?;
                tags.extend(extract_tags(&content));
            }
        }

        Ok(())
    }
}

impl NoteHost for FsVault {
    fn resolve(&self, path: &str) -> Result<NoteHandle, VaultError> {
        let location = self.locate(path)?;
        if !location.is_file() {
            return Err(VaultError::NotFound(path.to_string()));
        }

        Ok(NoteHandle {
            path: path.trim().to_string(),
            location,
        })
    }

    fn append(&self, note: &NoteHandle, text: &str) -> Result<(), VaultError> {
        let io_err = |source| VaultError::Io {
            path: note.location.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(&note.location)
            .map_err(io_err)?;

        // Lock is released when file is dropped
        file.lock_exclusive().map_err(io_err)?;
        file.write_all(text.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        tracing::debug!(note = %note.path, bytes = text.len(), "appended to note");
        Ok(())
    }

    fn tags(&self) -> Result<Vec<String>, VaultError> {
        let mut tags = BTreeSet::new();
        self.collect_tags(&self.root, &mut tags)?;

        let mut tags: Vec<String> = tags.into_iter().collect();
        tags.sort_by_key(|t| t.to_lowercase());
        Ok(tags)
    }
}

/// Extracts `#tag` tokens from markdown text.
///
/// A tag starts at a `#` that opens a word and runs over letters, digits,
/// `_`, `-` and `/`. Purely numeric tokens (`#1`) are not tags.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let opens_word = prev.map_or(true, char::is_whitespace);
        prev = Some(c);

        if c != '#' || !opens_word {
            continue;
        }

        let start = i + c.len_utf8();
        let mut end = start;
        while let Some(&(j, next)) = chars.peek() {
            if next.is_alphanumeric() || matches!(next, '_' | '-' | '/') {
                end = j + next.len_utf8();
                prev = Some(next);
                chars.next();
            } else {
                break;
            }
        }

        let tag = text[start..end].trim_end_matches('/');
        if !tag.is_empty() && !tag.chars().all(|ch| ch.is_ascii_digit()) {
            tags.push(tag.to_string());
        }
    }

    tags
}
