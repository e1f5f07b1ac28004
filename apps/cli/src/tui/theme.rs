//! Color palette for the TUI.
//!
//! Uses 24-bit colors when the terminal advertises them and falls back to
//! the 256-color palette otherwise.

use editor_lifecycle::ProjectStatus;
use ratatui::style::Color;
use std::env;

/// Check if the terminal supports true color (24-bit RGB).
fn supports_true_color() -> bool {
    if let Ok(colorterm) = env::var("COLORTERM") {
        let ct = colorterm.to_lowercase();
        if ct == "truecolor" || ct == "24bit" {
            return true;
        }
    }

    // Some terminals advertise it in TERM instead
    if let Ok(term) = env::var("TERM") {
        let t = term.to_lowercase();
        if t.contains("truecolor") || t.contains("24bit") || t.contains("direct") {
            return true;
        }
    }

    false
}

/// Color palette for the TUI.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    // Backgrounds
    pub bg: Color,
    pub bg_panel: Color,
    pub bg_selection: Color,

    // Borders
    pub border: Color,
    pub border_active: Color,

    // Text
    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    /// Rows with an operation in flight.
    pub busy: Color,
}

impl Theme {
    pub fn detect() -> Self {
        if supports_true_color() {
            Self::rgb()
        } else {
            Self::indexed()
        }
    }

    fn rgb() -> Self {
        Self {
            bg: Color::Rgb(0x0A, 0x0E, 0x15),
            bg_panel: Color::Rgb(0x21, 0x26, 0x31),
            bg_selection: Color::Rgb(0x37, 0x3F, 0x4E),

            border: Color::Rgb(0x4E, 0x57, 0x6A),
            border_active: Color::Rgb(0xEE, 0xD2, 0x63),

            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_secondary: Color::Rgb(0xE0, 0xE4, 0xEB),
            text_muted: Color::Rgb(0xBF, 0xC6, 0xD4),

            accent: Color::Rgb(0xEE, 0xD2, 0x63),

            success: Color::Rgb(0x8E, 0xEF, 0xE8),
            warning: Color::Rgb(0xEE, 0xD2, 0x63),
            error: Color::Rgb(0xE8, 0x8E, 0x8E),

            busy: Color::Rgb(0xDC, 0xB6, 0xF7),
        }
    }

    /// For terminals like macOS Terminal.app that don't support true color.
    fn indexed() -> Self {
        // 232-255 grayscale, 16-231 color cube
        Self {
            bg: Color::Indexed(233),
            bg_panel: Color::Indexed(235),
            bg_selection: Color::Indexed(238),

            border: Color::Indexed(241),
            border_active: Color::Indexed(220),

            text: Color::Indexed(255),
            text_secondary: Color::Indexed(252),
            text_muted: Color::Indexed(245),

            accent: Color::Indexed(220),

            success: Color::Indexed(123),
            warning: Color::Indexed(220),
            error: Color::Indexed(210),

            busy: Color::Indexed(183),
        }
    }

    /// Badge color for a project's status.
    pub fn status_color(&self, status: ProjectStatus) -> Color {
        match status {
            ProjectStatus::Running => self.success,
            ProjectStatus::Crashed => self.error,
            ProjectStatus::Idle => self.text_muted,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
