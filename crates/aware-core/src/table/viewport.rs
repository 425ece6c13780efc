//! Visible window over the table rows.

use std::ops::Range;

/// Visible window (offset + height) over the ordered row list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible row.
    pub offset: usize,
    /// Number of visible rows.
    pub height: usize,
    /// Width in terminal cells.
    pub width: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            offset: 0,
            height,
            width,
        }
    }

    /// Rows per page. A zero-height viewport still shows the cursor row.
    pub fn page(&self) -> usize {
        self.height.max(1)
    }

    /// Scrolls by the minimal amount that brings `cursor` into view, then
    /// clamps the offset so the window never runs past the last row.
    pub fn follow(&mut self, cursor: usize, len: usize) {
        let page = self.page();
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor > self.offset + page - 1 {
            self.offset = cursor + 1 - page;
        }
        self.offset = self.offset.min(len.saturating_sub(page));
    }

    /// Shows the last page.
    pub fn goto_bottom(&mut self, len: usize) {
        self.offset = len.saturating_sub(self.page());
    }

    /// Row indices currently inside the window.
    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.page()).min(len)
    }
}
