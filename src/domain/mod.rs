//! Domain models for create-task
//!
//! Contains the task line rules without any I/O concerns.

mod due;
mod line;
mod settings;
mod tags;
mod target;

pub use due::parse_due_date;
pub use line::{
    compile_line, format_date, TaskLineRequest, CHECKBOX, CREATED_MARKER, DATE_TOKEN,
    DEFAULT_DATE_FORMAT, PLACEHOLDER_DESCRIPTION,
};
pub use settings::{CustomNote, Settings, SettingsError};
pub use tags::{current_tag_at, insert_tag, merge_tags, parse_tags, suggest, DEFAULT_SUGGESTION_LIMIT};
pub use target::{ResolvedTarget, Target, TargetError};
