//! Stateless text rendering of a table.
//!
//! The frame is plain text: styling (selected row highlight, header colors)
//! is applied by the terminal layer on top of it.

use std::fmt;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::TableState;

const ELLIPSIS: char = '…';

/// Separator between short-help bindings.
const HELP_SEPARATOR: &str = " • ";

/// Key bindings shown in the full help, grouped in columns of two.
pub const FULL_HELP: &[[(&str, &str); 2]] = &[
    [("↑/k", "up"), ("↓/j", "down")],
    [("b/pgup", "page up"), ("f/pgdn", "page down")],
    [("u", "½ page up"), ("d", "½ page down")],
    [("g/home", "go to start"), ("G/end", "go to end")],
    [("enter", "open item"), ("r", "refresh")],
    [("c", "to clipboard"), ("esc", "toggle focus")],
    [("?", "toggle help"), ("q/ctrl+c", "exit")],
];

const SHORT_HELP: &[(&str, &str)] = &[("q/ctrl+c", "exit"), ("?", "toggle help")];

/// Lines that surround the row window: header, header rule, footer rule,
/// footer, plus the help block.
pub fn chrome_height(help_visible: bool) -> usize {
    let help_lines = if help_visible { 2 } else { 1 };
    4 + help_lines
}

/// Truncates `s` to at most `width` terminal cells, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Truncates and right-pads `s` to exactly `width` cells.
fn fit(s: &str, width: usize) -> String {
    let mut cell = truncate(s, width);
    let pad = width.saturating_sub(cell.width());
    cell.extend(std::iter::repeat_n(' ', pad));
    cell
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, &width) in cells.zip(widths) {
        line.push(' ');
        line.push_str(&fit(cell, width));
        line.push(' ');
    }
    line
}

fn short_help() -> String {
    SHORT_HELP
        .iter()
        .map(|(key, desc)| format!("{} {}", key, desc))
        .collect::<Vec<_>>()
        .join(HELP_SEPARATOR)
}

fn full_help() -> Vec<String> {
    let mut lines = vec![String::new(), String::new()];
    for (i, group) in FULL_HELP.iter().enumerate() {
        let entries: Vec<String> = group
            .iter()
            .map(|(key, desc)| format!("{} {}", key, desc))
            .collect();
        let col_width = entries.iter().map(|e| e.width()).max().unwrap_or(0);
        for (line, entry) in lines.iter_mut().zip(&entries) {
            if i > 0 {
                line.push_str("    ");
            }
            line.push_str(&fit(entry, col_width));
        }
    }
    for line in &mut lines {
        line.truncate(line.trim_end().len());
    }
    lines
}

/// One rendered table frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    pub header: String,
    /// Visible rows only, top to bottom.
    pub rows: Vec<String>,
    /// Index into `rows` of the cursor row, if visible.
    pub selected: Option<usize>,
    pub footer: String,
    pub help: Vec<String>,
    /// Width of the horizontal rules.
    pub width: usize,
}

impl TextFrame {
    pub fn rule(&self) -> String {
        "─".repeat(self.width)
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.rule();
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", rule)?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        writeln!(f, "{}", rule)?;
        write!(f, "{}", self.footer)?;
        for line in &self.help {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Renders the current table state. `status` is appended to the footer.
pub fn render_frame(table: &TableState, status: Option<&str>) -> TextFrame {
    let widths: Vec<usize> = table.columns().iter().map(|c| c.width).collect();
    let header = render_line(table.columns().iter().map(|c| c.title.as_str()), &widths);

    let viewport = table.viewport();
    let visible = viewport.visible(table.len());
    let selected = visible
        .contains(&table.cursor())
        .then(|| table.cursor() - visible.start);
    let rows = table.rows()[visible]
        .iter()
        .map(|row| render_line(row.iter().map(String::as_str), &widths))
        .collect();

    let mut footer = format!("Showing {} entries", table.len());
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        footer.push_str("  ");
        footer.push_str(status);
    }

    let help = if table.help_visible() {
        full_help()
    } else {
        vec![short_help()]
    };

    TextFrame {
        header,
        rows,
        selected,
        footer,
        help,
        width: viewport.width,
    }
}
