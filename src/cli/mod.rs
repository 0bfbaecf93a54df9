//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Vault setup | `init` |
//! | Tasks | Writing task lines | `add`, `preview`, `url` |
//! | Notes | Target notes | `notes list`, `notes add`, `notes remove` |
//! | Settings | Vault settings | `config show`, `config default-note` |
//! | Tags | Tag completion | `tags list`, `tags suggest` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logging on stderr:
//! ```bash
//! create-task --verbose add "Ship report" --due friday
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod config_cmd;
mod notes;
mod output;
mod tags_cmd;
mod task;
mod url_cmd;

pub use app::{run, Cli, Commands, Context};
pub use output::{Output, OutputFormat};
