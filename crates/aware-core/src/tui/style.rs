//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Table color palette.
pub struct Theme;

impl Theme {
    pub const HEADER_FG: Color = Color::Indexed(252);
    pub const RULE: Color = Color::Indexed(240);

    pub const SELECTED_FG: Color = Color::Indexed(229);
    pub const SELECTED_BG: Color = Color::Indexed(57);
    pub const SELECTED_BLURRED_BG: Color = Color::Indexed(238);

    pub const STATUS: Color = Color::Yellow;
    pub const HELP_KEY: Color = Color::Indexed(244);
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn rule() -> Style {
        Style::default().fg(Theme::RULE)
    }

    /// Cursor row. A blurred table keeps the row marked but dimmed.
    pub fn selected(focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Theme::SELECTED_FG)
                .bg(Theme::SELECTED_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Theme::SELECTED_BLURRED_BG)
        }
    }

    pub fn status() -> Style {
        Style::default().fg(Theme::STATUS)
    }

    pub fn help() -> Style {
        Style::default().fg(Theme::HELP_KEY)
    }
}
