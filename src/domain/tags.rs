//! Tag handling
//!
//! Tags are typed as a whitespace-separated string (`work urgent`) and stored
//! without the leading `#`. This module splits and merges them, and provides
//! the completion helpers behind `create-task tags suggest`.

/// Default number of suggestions returned
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Splits a raw tag string into tags, dropping empty tokens and any `#`
/// prefix the user typed
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .map(|t| t.trim_start_matches('#'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merges a note-level tag with user-supplied tags.
///
/// The note tag always comes first. Duplicates are kept.
pub fn merge_tags(note_tag: Option<&str>, user_tags: Option<&str>) -> Vec<String> {
    [note_tag, user_tags]
        .into_iter()
        .flatten()
        .flat_map(parse_tags)
        .collect()
}

/// Byte range of the space-delimited token containing `cursor`
fn token_bounds(value: &str, cursor: usize) -> (usize, usize) {
    let cursor = clamp_to_boundary(value, cursor);

    let start = value[..cursor].rfind(' ').map(|i| i + 1).unwrap_or(0);
    let end = value[cursor..]
        .find(' ')
        .map(|i| cursor + i)
        .unwrap_or(value.len());

    (start, end)
}

fn clamp_to_boundary(value: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(value.len());
    while !value.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// Returns the (partial) tag the cursor is in
pub fn current_tag_at(value: &str, cursor: usize) -> &str {
    let (start, end) = token_bounds(value, cursor);
    value[start..end].trim()
}

/// Suggests tags for a partial input.
///
/// A tag matches when any of its `/`-separated segments starts with the
/// partial, ignoring case. `available` order is preserved.
pub fn suggest(available: &[String], partial: &str, limit: usize) -> Vec<String> {
    let partial = partial.trim().trim_start_matches('#').to_lowercase();
    if partial.is_empty() {
        return Vec::new();
    }

    available
        .iter()
        .filter(|tag| {
            tag.to_lowercase()
                .split('/')
                .any(|segment| segment.starts_with(&partial))
        })
        .take(limit)
        .cloned()
        .collect()
}

/// Replaces the tag at `cursor` with `tag`, returning the new value and the
/// cursor position just after the inserted tag
pub fn insert_tag(value: &str, cursor: usize, tag: &str) -> (String, usize) {
    let (start, end) = token_bounds(value, cursor);
    let updated = format!("{}{} {}", &value[..start], tag, &value[end..]);

    (updated.trim().to_string(), start + tag.len() + 1)
}
