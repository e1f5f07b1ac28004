//! Main render function and layout for the TUI.

use super::app::{App, InputMode};
use super::components::{help, project_list};
use super::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

/// Render the entire application.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    Clear.render(area, frame.buffer_mut());
    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, frame.buffer_mut());

    // Project list above, status bar at the bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    project_list::render(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);

    help::render(frame, app);
}

/// Render the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let (text, color) = if app.input_mode == InputMode::Filter {
        (format!("/{}_", app.filter), theme.accent)
    } else if let Some(msg) = &app.status_message {
        (msg.clone(), theme.warning)
    } else {
        (build_status_text(app), theme.text_muted)
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            truncate_str(&text, area.width.saturating_sub(2) as usize),
            Style::default().fg(color),
        ),
    ]))
    .style(Style::default().bg(theme.bg_panel));

    frame.render_widget(status, area);
}

fn build_status_text(app: &App) -> String {
    let busy = if app.pending.is_empty() {
        String::new()
    } else {
        format!("{} busy | ", app.pending.len())
    };
    format!(
        "{}{} projects | Enter: open | s: stop | /: filter | ?: help | q: quit",
        busy,
        app.projects.len()
    )
}

/// Helper to create a styled block for panels.
pub fn panel_block<'a>(title: &str, is_active: bool, theme: &Theme) -> Block<'a> {
    let border_color = if is_active {
        theme.border_active
    } else {
        theme.border
    };

    let title_color = if is_active {
        theme.accent
    } else {
        theme.text_secondary
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(title_color))
        .style(Style::default().bg(theme.bg_panel))
}

/// Truncate a string to `max_width` characters, marking the cut with `...`.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_width).collect()
    }
}

/// A `width` x `height` rectangle centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Racer", 10), "Racer");
        assert_eq!(truncate_str("Racer", 5), "Racer");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate_str("Platformer", 7), "Plat...");
        assert_eq!(truncate_str("Platformer", 2), "Pl");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate_str("ゲームプロジェクト", 5), "ゲー...");
    }

    #[test]
    fn centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(40, 40, area), area);
    }
}
