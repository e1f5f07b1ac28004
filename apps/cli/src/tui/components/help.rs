//! Key binding overlay.

use crate::tui::app::App;
use crate::tui::ui::centered_rect;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BINDINGS: &[(&str, &str)] = &[
    ("j / Down", "next project"),
    ("k / Up", "previous project"),
    ("Enter / o", "open in editor"),
    ("s", "stop editor"),
    ("/", "filter by title or path"),
    ("Esc", "clear filter"),
    ("r", "reload projects and status"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

/// Render the help overlay when it is open.
pub fn render(frame: &mut Frame, app: &App) {
    if !app.show_help {
        return;
    }

    let theme = &app.theme;
    let area = centered_rect(44, BINDINGS.len() as u16 + 4, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", key),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(theme.text_secondary)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.text_muted),
    )));

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_active))
            .style(Style::default().bg(theme.bg_panel)),
    );
    frame.render_widget(help, area);
}
