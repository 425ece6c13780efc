//! Terminal clipboard via the OSC 52 escape sequence.

use std::io::{self, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::clipboard::{Clipboard, ClipboardError};

/// Sets the clipboard of the terminal emulator the process runs in.
///
/// Works over SSH and inside tmux (with `set-clipboard on`), needs no
/// platform clipboard service.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", payload)
            .and_then(|_| self.out.flush())
            .map_err(|e| ClipboardError::Backend(e.to_string()))
    }
}
