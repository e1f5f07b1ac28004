//! Listing projects and their editor status.

use crate::context::HubContext;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use editor_lifecycle::ProjectStatus;
use hub_projects::{current_branch, HubProject};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct ProjectSummary {
    title: String,
    path: PathBuf,
    version: Option<String>,
    status: ProjectStatus,
    branch: Option<String>,
    favorite: bool,
    last_opened: Option<String>,
}

impl ProjectSummary {
    fn new(project: HubProject, status: ProjectStatus) -> Self {
        Self {
            branch: current_branch(&project.path),
            last_opened: project.last_modified.map(|t| t.to_rfc3339()),
            title: project.title,
            path: project.path,
            version: project.version,
            status,
            favorite: project.favorite,
        }
    }
}

/// List registered projects with status and branch.
pub async fn list(ctx: &HubContext, format: &OutputFormat) -> Result<()> {
    let projects = ctx.projects()?;
    let paths: Vec<PathBuf> = projects.iter().map(|p| p.path.clone()).collect();
    let statuses = ctx.lifecycle.statuses(&paths).await?;

    let summaries: Vec<ProjectSummary> = projects
        .into_iter()
        .zip(statuses)
        .map(|(project, (_, status))| ProjectSummary::new(project, status))
        .collect();

    match format {
        OutputFormat::Json => output::print_json(&summaries),
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("No projects registered in the hub.");
                return Ok(());
            }
            output::print_heading("Projects");
            for summary in &summaries {
                let star = if summary.favorite { "*" } else { " " };
                println!(
                    "{} {:<28} {:<8} {:<12} {}",
                    star,
                    summary.title,
                    summary.status,
                    summary.version.as_deref().unwrap_or("-"),
                    summary.branch.as_deref().unwrap_or(""),
                );
            }
        }
    }
    Ok(())
}

/// Show the status of one project.
pub async fn status(ctx: &HubContext, query: &str, format: &OutputFormat) -> Result<()> {
    let project = ctx.find_project(query)?;
    let status = ctx.lifecycle.status(&project.path).await?;
    let summary = ProjectSummary::new(project, status);

    match format {
        OutputFormat::Json => output::print_json(&summary),
        OutputFormat::Text => {
            output::print_heading(&summary.title);
            output::print_row("Path", &summary.path.display().to_string());
            output::print_row("Status", summary.status.as_str());
            output::print_row("Version", summary.version.as_deref().unwrap_or("unknown"));
            if let Some(branch) = &summary.branch {
                output::print_row("Branch", branch);
            }
            if let Some(last_opened) = &summary.last_opened {
                output::print_row("Last opened", last_opened);
            }
        }
    }
    Ok(())
}
