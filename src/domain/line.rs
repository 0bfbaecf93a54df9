//! Task line compiler
//!
//! Turns a [`TaskLineRequest`] into a single markdown checkbox line, with the
//! details (if any) as indented bullets below it. The current date is an
//! explicit parameter so the same inputs always compile to the same text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::due::parse_due_date;

/// Open checkbox that starts every task line
pub const CHECKBOX: &str = "- [ ]";

/// Description used when the user left it empty
pub const PLACEHOLDER_DESCRIPTION: &str = "My task";

/// Marker placed before the creation date
pub const CREATED_MARKER: &str = "➕";

/// Token replaced by the due date inside a date format template
pub const DATE_TOKEN: &str = "YYYY-MM-DD";

/// Template used when settings carry an empty date format
pub const DEFAULT_DATE_FORMAT: &str = "@due(YYYY-MM-DD)";

/// Everything needed to compile one task line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLineRequest {
    /// Tags without their leading `#`, in output order
    pub tags: Vec<String>,

    /// Task description
    pub description: String,

    /// Free-form due date ("friday", "2024-03-10", ...)
    pub due_date_text: String,

    /// Optional multi-line details
    pub details: String,

    /// Template containing the literal `YYYY-MM-DD`
    pub date_format: String,
}

impl TaskLineRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_due(mut self, due_date_text: impl Into<String>) -> Self {
        self.due_date_text = due_date_text.into();
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }
}

/// Formats a calendar date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Compiles a task line.
///
/// Never fails: due-date text that cannot be parsed simply drops the due
/// segment. The result carries no trailing newline.
pub fn compile_line(request: &TaskLineRequest, now: NaiveDate) -> String {
    let mut line = String::from(CHECKBOX);

    let tags: Vec<&str> = request
        .tags
        .iter()
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .collect();
    for tag in tags {
        line.push_str(" #");
        line.push_str(tag);
    }

    line.push(' ');
    if request.description.is_empty() {
        line.push_str(PLACEHOLDER_DESCRIPTION);
    } else {
        line.push_str(&request.description);
    }

    line.push(' ');
    line.push_str(CREATED_MARKER);
    line.push(' ');
    line.push_str(&format_date(now));

    if let Some(segment) = due_segment(request, now) {
        line.push(' ');
        line.push_str(&segment);
    }

    if !request.details.is_empty() {
        line.push_str("\n\t- ");
        line.push_str(&request.details.replace('\n', "\n\t- "));
    }

    line
}

/// Renders the due-date segment, or `None` when there is no usable due date
fn due_segment(request: &TaskLineRequest, now: NaiveDate) -> Option<String> {
    if request.due_date_text.is_empty() {
        return None;
    }

    let due = parse_due_date(&request.due_date_text, now)?;
    let template = if request.date_format.is_empty() {
        DEFAULT_DATE_FORMAT
    } else {
        request.date_format.as_str()
    };

    // Only the first occurrence is substituted
    Some(template.replacen(DATE_TOKEN, &format_date(due), 1))
}
