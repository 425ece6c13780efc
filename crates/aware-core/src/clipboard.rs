//! Clipboard abstraction for the table copy command.

/// Errors raised while copying a cell to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The table has no rows to copy from.
    EmptyTable,
    /// The requested column does not exist.
    ColumnOutOfRange { index: usize, columns: usize },
    /// The clipboard backend rejected the write.
    Backend(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::EmptyTable => write!(f, "nothing to copy: table is empty"),
            ClipboardError::ColumnOutOfRange { index, columns } => {
                write!(f, "column {} out of range ({} columns)", index, columns)
            }
            ClipboardError::Backend(msg) => write!(f, "clipboard error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// System clipboard sink.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Backend("unavailable".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
