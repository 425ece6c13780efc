//! Table construction.

use crate::bridge::AppendSlot;

use super::{
    Column, DEFAULT_MIN_WIDTH, RefreshFn, Row, TableError, TableState, Viewport, check_arity,
};

/// Builder for [`TableState`].
///
/// Every flag defaults to off; the table starts blurred with an empty viewport
/// until sized.
#[derive(Default)]
pub struct TableOptions {
    columns: Vec<Column>,
    rows: Vec<Row>,
    width: usize,
    height: usize,
    focused: bool,
    autowidth: bool,
    sticky_cursor: bool,
    help: bool,
    min_width: Option<usize>,
    copy_column: usize,
    refresh: Option<RefreshFn>,
    append: Option<AppendSlot>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Number of visible table rows.
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn size(self, width: usize, height: usize) -> Self {
        self.width(width).height(height)
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Balance column widths to the viewport width on every resize and data change.
    pub fn autowidth(mut self, autowidth: bool) -> Self {
        self.autowidth = autowidth;
        self
    }

    pub fn sticky_cursor(mut self, sticky: bool) -> Self {
        self.sticky_cursor = sticky;
        self
    }

    /// Start with the full help visible.
    pub fn help(mut self, help: bool) -> Self {
        self.help = help;
        self
    }

    pub fn min_width(mut self, min_width: usize) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn copy_column(mut self, column: usize) -> Self {
        self.copy_column = column;
        self
    }

    pub fn refresh(mut self, fetch: RefreshFn) -> Self {
        self.refresh = Some(fetch);
        self
    }

    /// Attaches the slot a producer stages rows into.
    pub fn appending(mut self, slot: AppendSlot) -> Self {
        self.append = Some(slot);
        self
    }

    /// Validates the initial rows and builds the table.
    pub fn build(self) -> Result<TableState, TableError> {
        check_arity(self.columns.len(), &self.rows, 0)?;

        let mut table = TableState {
            columns: self.columns,
            rows: self.rows,
            cursor: 0,
            viewport: Viewport::new(self.width, self.height),
            focus: self.focused,
            sticky_cursor: self.sticky_cursor,
            autowidth: self.autowidth,
            help_visible: self.help,
            min_width: self.min_width.unwrap_or(DEFAULT_MIN_WIDTH),
            copy_column: self.copy_column,
            refresh: self.refresh,
            append: self.append,
        };
        table.update_column_widths();
        Ok(table)
    }
}
