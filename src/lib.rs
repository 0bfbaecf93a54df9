//! create-task - append formatted task lines to markdown notes
//!
//! A task line is a markdown checkbox with tags, a description, a creation
//! date and an optional due date, followed by indented detail bullets.
//! Lines are appended to a default note, a named custom note, or any note in
//! the vault, from the command line or from a `create-task` URL.

pub mod cli;
pub mod create;
pub mod domain;
pub mod protocol;
pub mod storage;

pub use create::{create_task, prepare, CreateError, CreatedTask, PreparedTask, TaskInput};
pub use domain::{compile_line, Settings, Target, TaskLineRequest};
