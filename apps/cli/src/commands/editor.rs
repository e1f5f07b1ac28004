//! Launching and stopping editors.

use crate::context::{open_project, HubContext, OpenOutcome};
use crate::output::{self, OutputFormat};
use anyhow::{bail, Result};
use serde_json::json;

/// Open a project in its editor, or focus the editor that already has it.
pub async fn launch(ctx: &HubContext, query: &str, format: &OutputFormat) -> Result<()> {
    let project = ctx.find_project(query)?;

    match open_project(&ctx.lifecycle, &project).await? {
        OpenOutcome::Skipped(message) => output::print_success(&message, format),
        OpenOutcome::Launched(launched) => match format {
            OutputFormat::Json => output::print_json(&json!({
                "status": "launched",
                "project": project.path,
                "binary": launched.binary,
                "args": launched.args,
                "pid": launched.pid,
            })),
            OutputFormat::Text => {
                println!("Launched {}", project.title);
                output::print_row("Editor", &launched.binary.display().to_string());
                if let Some(pid) = launched.pid {
                    output::print_row("PID", &pid.to_string());
                }
            }
        },
    }
    Ok(())
}

/// Stop the editor that has a project open.
pub async fn stop(ctx: &HubContext, query: &str, format: &OutputFormat) -> Result<()> {
    let project = ctx.find_project(query)?;
    let outcome = ctx.lifecycle.stop(&project.path).await?;

    if outcome.process_found && !outcome.terminated {
        bail!("editor for {} is still running after kill", project.title);
    }

    match format {
        OutputFormat::Json => output::print_json(&json!({
            "project": project.path,
            "outcome": outcome,
        })),
        OutputFormat::Text => match outcome.stage {
            Some(stage) => println!("Stopped {} ({})", project.title, stage),
            None => println!("{} is not open in an editor, nothing to stop", project.title),
        },
    }
    Ok(())
}
