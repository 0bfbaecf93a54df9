//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{config_cmd, notes, tags_cmd, task, url_cmd};
use crate::storage::Workspace;

#[derive(Parser)]
#[command(name = "create-task")]
#[command(author, version, about = "Append formatted tasks to markdown notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Vault directory (defaults to the enclosing vault, then the global default)
    #[arg(long, global = true, env = "CREATE_TASK_VAULT")]
    pub vault: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up a directory as a vault
    Init {
        /// Vault directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Append a task to a note
    ///
    /// Examples:
    ///   create-task add "Ship report" --tags work --due friday
    ///   create-task add "Call Bob" --to Work --details "number in contacts"
    ///   create-task add "Fix bike" --to Home/Chores.md --no-due
    Add {
        #[command(flatten)]
        task: task::TaskArgs,

        /// Print the task instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the task line that `add` would write
    Preview {
        #[command(flatten)]
        task: task::TaskArgs,
    },

    /// Handle a create-task URL (obsidian://create-task?...)
    Url {
        /// The full URL
        url: String,
    },

    /// Manage custom target notes
    #[command(subcommand)]
    Notes(notes::NotesCommands),

    /// View and change settings
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),

    /// List and complete tags used in the vault
    #[command(subcommand)]
    Tags(tags_cmd::TagsCommands),
}

/// Values shared by every command
pub struct Context {
    /// `--vault` override
    pub vault: Option<PathBuf>,

    /// Local calendar date, read once per invocation
    pub today: NaiveDate,
}

impl Context {
    /// Opens the vault for this invocation
    pub fn workspace(&self) -> Result<Workspace> {
        Workspace::discover(self.vault.as_deref())
    }
}

/// Installs the tracing subscriber.
///
/// `--verbose` turns on debug events for this crate; otherwise `RUST_LOG` is
/// honoured with a `warn` default.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("create_task=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = Output::new(cli.format);
    let ctx = Context {
        vault: cli.vault,
        today: Local::now().date_naive(),
    };

    tracing::debug!(today = %ctx.today, "create-task starting");

    match cli.command {
        Commands::Init { path } => {
            let workspace = Workspace::init(&path)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "root": workspace.root().display().to_string(),
                    "default_note": workspace.settings().default_note,
                }));
            } else {
                output.success(&format!("Initialized vault at {}", workspace.root().display()));
                if workspace.settings().default_note.is_none() {
                    println!();
                    println!("Next, pick the note new tasks go to:");
                    println!("  create-task config default-note <path>");
                }
            }
        }

        Commands::Add { task, dry_run } => task::add(&ctx, &output, &task, dry_run)?,
        Commands::Preview { task } => task::preview(&ctx, &output, &task)?,
        Commands::Url { url } => url_cmd::run(&ctx, &output, &url)?,
        Commands::Notes(cmd) => notes::run(cmd, &ctx, &output)?,
        Commands::Config(cmd) => config_cmd::run(cmd, &ctx, &output)?,
        Commands::Tags(cmd) => tags_cmd::run(cmd, &ctx, &output)?,
    }

    tracing::debug!("command completed");
    Ok(())
}
