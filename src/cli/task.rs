//! `add` and `preview` commands

use anyhow::Result;
use clap::Args;

use super::app::Context;
use super::output::Output;
use crate::create::{create_task, prepare, TaskInput};
use crate::domain::{Settings, Target};

/// Task fields shared by `add` and `preview`
#[derive(Args, Debug, Clone)]
pub struct TaskArgs {
    /// Task description
    pub description: Option<String>,

    /// Target note: `default`, a custom note name or index, or a note path
    #[arg(long, default_value = "default")]
    pub to: String,

    /// Space-separated tags, without `#`
    #[arg(long, short = 't')]
    pub tags: Option<String>,

    /// Due date in plain words ("friday", "in 3 days", "2024-03-10")
    #[arg(long, short = 'd', default_value = "today")]
    pub due: String,

    /// Leave the due date off
    #[arg(long, conflicts_with = "due")]
    pub no_due: bool,

    /// Details, one indented bullet per line
    #[arg(long)]
    pub details: Option<String>,
}

impl TaskArgs {
    fn input(&self, settings: &Settings) -> Result<TaskInput> {
        let details = self.details.clone().unwrap_or_default();
        if settings.hide_details_field && !details.is_empty() {
            anyhow::bail!(
                "The details field is hidden. Run 'create-task config hide-details false' to use it."
            );
        }

        Ok(TaskInput {
            description: self.description.clone().unwrap_or_default(),
            tags: self.tags.clone().filter(|t| !t.trim().is_empty()),
            due_date: if self.no_due {
                String::new()
            } else {
                self.due.clone()
            },
            details,
        })
    }
}

pub fn add(ctx: &Context, output: &Output, args: &TaskArgs, dry_run: bool) -> Result<()> {
    let workspace = ctx.workspace()?;
    let settings = workspace.settings();

    let input = args.input(settings)?;
    if input.description.trim().is_empty() {
        anyhow::bail!("Task description is required");
    }

    let target = Target::parse(Some(&args.to), settings);
    tracing::debug!(%target, "adding task");

    if dry_run {
        return show_preview(ctx, output, settings, &target, &input);
    }

    let created = create_task(&workspace.vault(), settings, &target, &input, ctx.today)?;

    if output.is_json() {
        output.data(&created);
    } else {
        output.success(&format!("Task created in {}", created.path));
        println!("{}", created.line);
    }

    Ok(())
}

pub fn preview(ctx: &Context, output: &Output, args: &TaskArgs) -> Result<()> {
    let workspace = ctx.workspace()?;
    let settings = workspace.settings();

    let input = args.input(settings)?;
    let target = Target::parse(Some(&args.to), settings);

    show_preview(ctx, output, settings, &target, &input)
}

pub(super) fn show_preview(
    ctx: &Context,
    output: &Output,
    settings: &Settings,
    target: &Target,
    input: &TaskInput,
) -> Result<()> {
    let prepared = prepare(settings, target, input, ctx.today)?;

    if output.is_json() {
        output.data(&prepared);
    } else {
        println!("Preview ({})", prepared.path);
        println!();
        println!("{}", prepared.line);
        if !input.due_date.is_empty() && prepared.due_date.is_none() {
            println!();
            println!("Note: due date '{}' was not understood and is left off", input.due_date);
        }
    }

    Ok(())
}
