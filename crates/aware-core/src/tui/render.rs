//! Draws a table frame with ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::table::{TableState, TextFrame, render_frame};

use super::style::Styles;

/// Main render function.
pub fn render(frame: &mut Frame, table: &TableState, status: Option<&str>) {
    let text = render_frame(table, None);
    let help_height = text.help.len() as u16;

    let chunks = Layout::vertical([
        Constraint::Length(1),           // Header
        Constraint::Length(1),           // Rule
        Constraint::Min(0),              // Rows
        Constraint::Length(1),           // Rule
        Constraint::Length(1),           // Footer
        Constraint::Length(help_height), // Help
    ])
    .split(frame.area());

    let rule = text.rule();
    frame.render_widget(Paragraph::new(text.header.as_str()).style(Styles::header()), chunks[0]);
    frame.render_widget(Paragraph::new(rule.as_str()).style(Styles::rule()), chunks[1]);
    frame.render_widget(Paragraph::new(row_lines(&text, table.is_focused())), chunks[2]);
    frame.render_widget(Paragraph::new(rule.as_str()).style(Styles::rule()), chunks[3]);
    frame.render_widget(Paragraph::new(footer_line(&text, status)), chunks[4]);
    frame.render_widget(
        Paragraph::new(text.help.join("\n")).style(Styles::help()),
        chunks[5],
    );
}

fn row_lines(text: &TextFrame, focused: bool) -> Vec<Line<'_>> {
    text.rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = Line::raw(row.as_str());
            if text.selected == Some(i) {
                line.style(Styles::selected(focused))
            } else {
                line
            }
        })
        .collect()
}

fn footer_line<'a>(text: &'a TextFrame, status: Option<&'a str>) -> Line<'a> {
    let mut spans = vec![Span::raw(text.footer.as_str())];
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status, Styles::status()));
    }
    Line::from(spans)
}
