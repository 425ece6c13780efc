//! Single-slot append mailbox.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::table::Row;

use super::{BridgeEvent, Disconnected};

/// Shared one-row mailbox between a producer and the table.
///
/// Writing before the previous row is consumed overwrites it: the slot holds
/// the most recent row only.
#[derive(Debug, Clone, Default)]
pub struct AppendSlot {
    inner: Arc<Mutex<Option<Row>>>,
}

impl AppendSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `row`, replacing any unconsumed one.
    /// Returns true when the slot was empty before the write.
    pub fn stage(&self, row: Row) -> bool {
        let mut slot = self.lock();
        let was_empty = slot.is_none();
        *slot = Some(row);
        was_empty
    }

    /// Removes and returns the staged row.
    pub fn take(&self) -> Option<Row> {
        self.lock().take()
    }

    /// Returns true if a row is waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Row>> {
        // The slot only ever holds a complete row, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Producer-side handle: stages rows and signals the event loop.
///
/// Only the write that fills an empty slot sends a readiness signal, so any
/// number of writes between two consumptions produce exactly one signal and
/// the loop appends the last of them.
#[derive(Debug)]
pub struct AppendHandle<E> {
    slot: AppendSlot,
    tx: Sender<E>,
}

impl<E: From<BridgeEvent>> AppendHandle<E> {
    pub fn new(slot: AppendSlot, tx: Sender<E>) -> Self {
        Self { slot, tx }
    }

    /// Stages `row` and signals readiness if the slot was empty.
    pub fn publish(&self, row: Row) -> Result<(), Disconnected> {
        if self.slot.stage(row) {
            self.tx
                .send(E::from(BridgeEvent::AppendReady))
                .map_err(|_| Disconnected)?;
        }
        Ok(())
    }
}
