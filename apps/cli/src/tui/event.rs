//! Keyboard event handling for the TUI.

use super::app::{App, InputMode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Handle input events. Returns true if the app should quit.
pub fn handle_events(app: &mut App) -> Result<bool> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }
            return Ok(handle_key_event(app, key));
        }
    }

    Ok(false)
}

/// Handle a key event. Returns true if the app should quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.show_help {
        // Any key closes the help overlay
        app.show_help = false;
        return false;
    }

    if app.input_mode == InputMode::Filter {
        handle_filter_mode(app, key);
        return false;
    }

    app.clear_status_message();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => {
            if !app.filter.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),

        KeyCode::Enter | KeyCode::Char('o') => {
            app.start_launch();
        }
        KeyCode::Char('s') => {
            app.start_stop();
        }

        KeyCode::Char('/') => app.input_mode = InputMode::Filter,
        KeyCode::Char('r') => {
            app.reload_projects();
            app.request_status_refresh();
            app.set_status_message("Refreshing...".to_string());
        }
        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }

    false
}

fn handle_filter_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.clear_filter();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Down => app.select_next(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Char(c) => app.push_filter_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context_with_registry;
    use crate::tui::theme::Theme;
    use std::sync::Arc;

    fn app() -> (tempfile::TempDir, App) {
        let (dir, ctx) = context_with_registry(
            r#"{
                "/work/Racer": {"title": "Racer", "path": "/work/Racer"},
                "/work/Puzzle": {"title": "Puzzle", "path": "/work/Puzzle"}
            }"#,
        );
        (dir, App::new(Arc::new(ctx), Theme::default()))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn q_quits_only_outside_filter_mode() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('/'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.filter, "q");

        press(&mut app, KeyCode::Enter);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn typing_filters_and_esc_clears() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('/'));
        for c in "puz".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.visible_projects().len(), 1);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filter, "pu");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.filter.is_empty());
        assert_eq!(app.visible_projects().len(), 2);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(!app.show_help);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('/'));
        assert!(handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn movement_keys() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
    }
}
