//! Interactive table engine: rows, cursor, viewport, focus and column widths.
//!
//! All operations are synchronous and run on the event loop thread. Navigation
//! and resize never fail; out-of-range input is clamped. Rows whose cell count
//! does not match the column count are rejected.

mod frame;
mod options;
mod viewport;
mod width;

pub use frame::{FULL_HELP, TextFrame, chrome_height, render_frame, truncate};
pub use options::TableOptions;
pub use viewport::Viewport;
pub use width::{DEFAULT_MIN_WIDTH, balance, desired_widths};

use std::sync::Arc;

use tracing::debug;

use crate::bridge::AppendSlot;
use crate::clipboard::{Clipboard, ClipboardError};

/// Horizontal padding around every cell (one space on each side).
pub const CELL_PADDING: usize = 2;

/// One line in the table.
pub type Row = Vec<String>;

/// Error type returned by data fetches.
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Data source used by manual refresh.
pub type RefreshFn = Arc<dyn Fn() -> Result<TableData, FetchError> + Send + Sync>;

/// Table column. The width is derived by the balancer, not authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub width: usize,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 0,
        }
    }

    pub fn with_width(title: impl Into<String>, width: usize) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// Columns plus rows, as returned by a data source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

/// Errors raised by table mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A row's cell count differs from the column count.
    Arity {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Refresh was requested on a table without a data source.
    NoDataSource,
    /// The data source failed.
    Fetch(String),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Arity {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, table has {} columns",
                row, found, expected
            ),
            TableError::NoDataSource => write!(f, "table has no data source"),
            TableError::Fetch(msg) => write!(f, "refresh failed: {}", msg),
        }
    }
}

impl std::error::Error for TableError {}

fn check_arity(columns: usize, rows: &[Row], first_index: usize) -> Result<(), TableError> {
    match rows.iter().position(|r| r.len() != columns) {
        Some(i) => Err(TableError::Arity {
            row: first_index + i,
            expected: columns,
            found: rows[i].len(),
        }),
        None => Ok(()),
    }
}

/// Full widget state. Built with [`TableOptions`].
pub struct TableState {
    columns: Vec<Column>,
    rows: Vec<Row>,
    cursor: usize,
    viewport: Viewport,
    focus: bool,
    sticky_cursor: bool,
    autowidth: bool,
    help_visible: bool,
    min_width: usize,
    copy_column: usize,
    refresh: Option<RefreshFn>,
    append: Option<AppendSlot>,
}

impl TableState {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the selected row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_focused(&self) -> bool {
        self.focus
    }

    pub fn sticky_cursor(&self) -> bool {
        self.sticky_cursor
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Column copied by [`TableState::copy_to_clipboard`].
    pub fn copy_column(&self) -> usize {
        self.copy_column
    }

    /// Data source used by refresh, if any.
    pub fn refresh_fn(&self) -> Option<&RefreshFn> {
        self.refresh.as_ref()
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.cursor)
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Blurred tables ignore navigation.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = !self.focus;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Moves the cursor up by `n` rows, stopping at the first row.
    pub fn move_up(&mut self, n: usize) {
        if !self.focus || self.rows.is_empty() {
            return;
        }
        self.cursor = self.cursor.saturating_sub(n);
        self.viewport.follow(self.cursor, self.rows.len());
    }

    /// Moves the cursor down by `n` rows, stopping at the last row.
    pub fn move_down(&mut self, n: usize) {
        if !self.focus || self.rows.is_empty() {
            return;
        }
        self.cursor = self.cursor.saturating_add(n).min(self.rows.len() - 1);
        self.viewport.follow(self.cursor, self.rows.len());
    }

    pub fn page_up(&mut self) {
        self.move_up(self.viewport.page());
    }

    pub fn page_down(&mut self) {
        self.move_down(self.viewport.page());
    }

    pub fn half_page_up(&mut self) {
        self.move_up(self.viewport.height / 2);
    }

    pub fn half_page_down(&mut self) {
        self.move_down(self.viewport.height / 2);
    }

    pub fn goto_top(&mut self) {
        self.move_up(self.cursor);
    }

    pub fn goto_bottom(&mut self) {
        if !self.focus {
            return;
        }
        self.move_down(self.rows.len());
        self.viewport.goto_bottom(self.rows.len());
    }

    /// Places the cursor at `n`, clamped to the row range.
    pub fn set_cursor(&mut self, n: usize) {
        if !self.focus || self.rows.is_empty() {
            return;
        }
        self.cursor = n.min(self.rows.len() - 1);
        self.viewport.follow(self.cursor, self.rows.len());
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Sets the viewport size in cells (`height` counts table rows only).
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.update_column_widths();
        self.clamp();
    }

    fn update_column_widths(&mut self) {
        if !self.autowidth || self.viewport.width == 0 {
            return;
        }
        let available = self
            .viewport
            .width
            .saturating_sub(CELL_PADDING * self.columns.len());
        let widths = balance(&self.columns, &self.rows, available, self.min_width);
        for (col, width) in self.columns.iter_mut().zip(widths) {
            col.width = width;
        }
    }

    /// Restores the cursor and offset invariants after the row set changed.
    fn clamp(&mut self) {
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.viewport.follow(self.cursor, self.rows.len());
    }

    // ------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------

    /// Replaces all rows. The row set is rejected as a whole if any row has
    /// the wrong number of cells.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> Result<(), TableError> {
        check_arity(self.columns.len(), &rows, 0)?;
        self.rows = rows;
        self.update_column_widths();
        self.clamp();
        Ok(())
    }

    /// Replaces columns and rows together.
    pub fn set_data(&mut self, data: TableData) -> Result<(), TableError> {
        check_arity(data.columns.len(), &data.rows, 0)?;
        self.columns = data.columns;
        self.rows = data.rows;
        self.update_column_widths();
        self.clamp();
        Ok(())
    }

    /// Fetches fresh data from the configured source and replaces the table.
    ///
    /// Blocks for as long as the fetch does. The event loop uses
    /// [`crate::bridge::RefreshWorker`] instead.
    pub fn refresh(&mut self) -> Result<(), TableError> {
        let fetch = self.refresh.clone().ok_or(TableError::NoDataSource)?;
        let data = fetch().map_err(|e| TableError::Fetch(e.to_string()))?;
        self.set_data(data)
    }

    /// Consumes the append slot and appends its row.
    ///
    /// Returns Ok(false) when the slot was empty (nothing to append).
    pub fn append_row(&mut self) -> Result<bool, TableError> {
        let Some(row) = self.append.as_ref().and_then(AppendSlot::take) else {
            return Ok(false);
        };
        self.push_row(row)?;
        Ok(true)
    }

    /// Appends one row. With a sticky cursor, a cursor resting on the last
    /// row moves to the new last row.
    pub fn push_row(&mut self, row: Row) -> Result<(), TableError> {
        check_arity(self.columns.len(), std::slice::from_ref(&row), self.rows.len())?;

        self.rows.push(row);
        let len = self.rows.len();
        if self.sticky_cursor && len >= 2 && self.cursor == len - 2 {
            self.cursor = len - 1;
            debug!("sticky cursor advanced to {}", self.cursor);
        }

        self.update_column_widths();
        self.viewport.follow(self.cursor, len);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Copies the cell at (cursor, `column`) to the clipboard and returns it.
    pub fn copy_cell(
        &self,
        column: usize,
        clipboard: &mut dyn Clipboard,
    ) -> Result<String, ClipboardError> {
        let row = self.selected_row().ok_or(ClipboardError::EmptyTable)?;
        let value = row
            .get(column)
            .ok_or(ClipboardError::ColumnOutOfRange {
                index: column,
                columns: self.columns.len(),
            })?
            .clone();
        clipboard.set_text(&value)?;
        Ok(value)
    }

    /// Copies the configured copy column of the selected row.
    pub fn copy_to_clipboard(&self, clipboard: &mut dyn Clipboard) -> Result<String, ClipboardError> {
        self.copy_cell(self.copy_column, clipboard)
    }
}

impl std::fmt::Debug for TableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableState")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("cursor", &self.cursor)
            .field("viewport", &self.viewport)
            .field("focus", &self.focus)
            .field("sticky_cursor", &self.sticky_cursor)
            .field("autowidth", &self.autowidth)
            .field("help_visible", &self.help_visible)
            .finish_non_exhaustive()
    }
}
