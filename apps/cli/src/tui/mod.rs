//! Ratatui-based terminal UI.
//!
//! One panel lists the hub's projects with their editor status. Launch and
//! stop run as background tasks so the list keeps redrawing while an editor
//! is starting or being shut down.

mod app;
mod components;
mod event;
mod theme;
mod ui;

use crate::context::HubContext;
use anyhow::Result;
use app::App;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::{io, panic};
use theme::Theme;
use tracing::info;

/// Restore terminal to normal state.
/// Called both on normal exit and on panic; errors are ignored because the
/// terminal may already be restored.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Install a panic hook that restores the terminal before displaying the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

/// Run the TUI until the user quits.
pub async fn run(ctx: Arc<HubContext>) -> Result<()> {
    install_panic_hook();

    let result = run_with_terminal(ctx).await;

    // Always restore, even if setup failed partway through
    restore_terminal();

    result
}

async fn run_with_terminal(ctx: Arc<HubContext>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ctx, Theme::detect());
    info!(projects = app.projects.len(), "terminal UI started");
    run_app(&mut terminal, &mut app).await
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.drain_task_events();

        if app.refresh_due() {
            app.request_status_refresh();
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::handle_events(app)? {
            break;
        }

        // Let spawned tasks make progress on a single-threaded runtime
        tokio::task::yield_now().await;
    }

    if !app.pending.is_empty() {
        info!(
            pending = app.pending.len(),
            "exiting with operations still running"
        );
    }
    Ok(())
}
