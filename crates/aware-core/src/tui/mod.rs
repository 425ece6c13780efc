//! Terminal runtime for the table widget.
//!
//! One thread polls the terminal, the loop thread owns the table and applies
//! keys, resizes, appended rows and refresh results in arrival order.

mod app;
mod clipboard;
mod event;
mod input;
mod render;
mod style;

pub use app::App;
pub use clipboard::Osc52Clipboard;
pub use event::{Event, EventHandler};
pub use input::{KeyAction, handle_key};
