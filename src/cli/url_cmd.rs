//! `url` command: handles create-task URLs from other apps

use anyhow::Result;
use serde::Serialize;

use super::app::Context;
use super::output::Output;
use super::task::show_preview;
use crate::create::{create_task, prepare};
use crate::protocol::{dispatch, ProtocolAction, ProtocolRequest};

/// JSON result: the task plus whether it reached the note
#[derive(Serialize)]
struct UrlOutcome<T> {
    written: bool,
    #[serde(flatten)]
    task: T,
}

pub fn run(ctx: &Context, output: &Output, url: &str) -> Result<()> {
    let request = ProtocolRequest::parse(url)?;
    tracing::debug!(?request, "parsed URL");

    let workspace = ctx.workspace()?;
    let vault = workspace.vault();
    let settings = workspace.settings();

    match dispatch(&request, &vault) {
        ProtocolAction::Create { target, input } => {
            let created = create_task(&vault, settings, &target, &input, ctx.today)?;
            if output.is_json() {
                output.data(&UrlOutcome {
                    written: true,
                    task: created,
                });
            } else {
                output.success(&format!("Task created in {}", created.path));
                println!("{}", created.line);
            }
        }
        ProtocolAction::Review { target, input } => {
            if output.is_json() {
                let prepared = prepare(settings, &target, &input, ctx.today)?;
                output.data(&UrlOutcome {
                    written: false,
                    task: prepared,
                });
            } else {
                println!("Not written. Review the task below and add it with 'create-task add'.");
                println!();
                show_preview(ctx, output, settings, &target, &input)?;
            }
        }
    }

    Ok(())
}
