//! Off-loop table refresh.

use std::io;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::debug;

use crate::table::RefreshFn;

use super::BridgeEvent;

/// Runs the table's data fetch on a worker thread and reports the result as a
/// [`BridgeEvent::Refreshed`] so the event loop never blocks on I/O.
///
/// At most one fetch is in flight; requests made while one is running are dropped.
#[derive(Debug, Default)]
pub struct RefreshWorker {
    in_flight: bool,
}

impl RefreshWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Starts a fetch. Returns Ok(false) when a fetch is already running.
    pub fn request<E>(&mut self, fetch: RefreshFn, tx: Sender<E>) -> io::Result<bool>
    where
        E: From<BridgeEvent> + Send + 'static,
    {
        if self.in_flight {
            return Ok(false);
        }

        thread::Builder::new()
            .name("table-refresh".to_string())
            .spawn(move || {
                let result = fetch().map_err(|e| e.to_string());
                debug!("refresh fetch finished (ok={})", result.is_ok());
                // Receiver gone means the loop already quit.
                let _ = tx.send(E::from(BridgeEvent::Refreshed(result)));
            })?;

        self.in_flight = true;
        Ok(true)
    }

    /// Marks the running fetch as delivered.
    pub fn complete(&mut self) {
        self.in_flight = false;
    }
}
