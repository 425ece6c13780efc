//! Append/refresh bridge between background producers and the table event loop.
//!
//! Producers never touch table state. They stage a row in an [`AppendSlot`]
//! and signal the loop with [`BridgeEvent::AppendReady`]; the loop consumes
//! the slot when it handles the signal. Refresh fetches run on a worker
//! thread and come back as [`BridgeEvent::Refreshed`].

mod producer;
mod refresh;
mod slot;

pub use producer::{CancelToken, Producer, Sample, SampleSource};
pub use refresh::RefreshWorker;
pub use slot::{AppendHandle, AppendSlot};

use crate::table::TableData;

/// Messages delivered to the table event loop by background work.
#[derive(Debug)]
pub enum BridgeEvent {
    /// A row is waiting in the append slot.
    AppendReady,
    /// A refresh fetch completed.
    Refreshed(Result<TableData, String>),
}

/// The event loop has shut down and dropped its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

impl std::fmt::Display for Disconnected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event loop disconnected")
    }
}

impl std::error::Error for Disconnected {}
