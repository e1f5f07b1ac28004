//! Project list with status badge, editor version and branch.

use crate::tui::app::{App, InputMode};
use crate::tui::theme::Theme;
use crate::tui::ui::{panel_block, truncate_str};
use hub_projects::HubProject;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

const BADGE_WIDTH: usize = 11;
const VERSION_WIDTH: usize = 14;

/// Render the project list panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let title = if app.filter.is_empty() {
        "Projects".to_string()
    } else {
        format!("Projects (filter: {})", app.filter)
    };
    let block = panel_block(&title, app.input_mode == InputMode::Normal, theme);

    let width = (area.width as usize).saturating_sub(4);
    let visible = app.visible_projects();
    let items: Vec<ListItem> = if visible.is_empty() {
        let message = if app.projects.is_empty() {
            "No projects registered in the hub"
        } else {
            "No projects match the filter"
        };
        vec![ListItem::new(Line::from(Span::styled(
            message,
            Style::default().fg(theme.text_muted),
        )))]
    } else {
        visible
            .iter()
            .map(|project| project_item(app, project, width, theme))
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .style(Style::default().bg(theme.bg_panel))
        .highlight_style(
            Style::default()
                .bg(theme.bg_selection)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn project_item(app: &App, project: &HubProject, width: usize, theme: &Theme) -> ListItem<'static> {
    let (badge, badge_color) = match (app.pending_of(project), app.status_of(project)) {
        (Some(op), _) => (op.label(), theme.busy),
        (None, Some(status)) => (status.as_str(), theme.status_color(status)),
        (None, None) => ("...", theme.text_muted),
    };

    let star = if project.favorite { "* " } else { "  " };
    let version = project.version.as_deref().unwrap_or("-");
    let branch = app.branch_of(project).unwrap_or("");

    let fixed = star.len() + BADGE_WIDTH + VERSION_WIDTH + 2;
    let title_width = width.saturating_sub(fixed).clamp(8, 40);

    let mut spans = vec![
        Span::styled(star.to_string(), Style::default().fg(theme.accent)),
        Span::styled(
            format!("{:<w$}", format!("[{}]", badge), w = BADGE_WIDTH),
            Style::default().fg(badge_color),
        ),
        Span::styled(
            format!("{:<w$} ", truncate_str(&project.title, title_width), w = title_width),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("{:<w$} ", truncate_str(version, VERSION_WIDTH), w = VERSION_WIDTH),
            Style::default().fg(theme.text_secondary),
        ),
    ];

    let remaining = width.saturating_sub(fixed + title_width);
    if !branch.is_empty() && remaining > 0 {
        spans.push(Span::styled(
            truncate_str(branch, remaining),
            Style::default().fg(theme.text_muted),
        ));
    }

    ListItem::new(Line::from(spans))
}
