//! Editor Hub - browse game projects and launch or stop their editors.

mod commands;
mod context;
mod output;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use context::HubContext;
use hub_config_and_utils::{init_logging, Config, LogTarget, Paths};
use std::sync::Arc;
use tracing::debug;

/// Editor Hub - launch and stop editors for the projects registered in the hub.
#[derive(Parser)]
#[command(name = "ehub")]
#[command(about = "Browse hub projects and launch or stop their editors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); defaults to the config file
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive terminal UI (default)
    Ui,

    /// List registered projects with status and branch
    List,

    /// Open a project in its editor, or focus the editor already running it
    Launch {
        /// Project path or title
        project: String,
    },

    /// Stop the editor that has a project open
    Stop {
        /// Project path or title
        project: String,
    },

    /// Show whether a project is idle, running or crashed
    Status {
        /// Project path or title
        project: String,
    },
}

impl Commands {
    fn log_target(command: Option<&Self>) -> LogTarget {
        match command {
            None | Some(Self::Ui) => LogTarget::Tui,
            Some(_) => LogTarget::Cli,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command, &cli.format, cli.log_level).await {
        output::print_error(&format!("{:#}", e), &cli.format);
        std::process::exit(1);
    }
}

async fn run(
    command: Option<Commands>,
    format: &output::OutputFormat,
    log_level: Option<String>,
) -> Result<()> {
    let paths = Paths::new()?;
    let config = Config::load(&paths)?;

    let level = log_level.unwrap_or_else(|| config.log_level.clone());
    init_logging(&paths, &level, Commands::log_target(command.as_ref()));
    debug!(config = ?config, "configuration loaded");

    let ctx = HubContext::new(config)?;

    match command {
        None | Some(Commands::Ui) => tui::run(Arc::new(ctx)).await,
        Some(Commands::List) => commands::list(&ctx, format).await,
        Some(Commands::Launch { project }) => commands::launch(&ctx, &project, format).await,
        Some(Commands::Stop { project }) => commands::stop(&ctx, &project, format).await,
        Some(Commands::Status { project }) => commands::status(&ctx, &project, format).await,
    }
}
