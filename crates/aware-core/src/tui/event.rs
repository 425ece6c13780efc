//! Event handling for TUI.
//!
//! A separate thread polls the terminal for keys, resizes and timer ticks.
//! Background producers and refresh workers post into the same channel via
//! [`EventHandler::sender`], so the loop sees one ordered event stream.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::bridge::BridgeEvent;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Poll timeout.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
    /// Row staged or refresh finished.
    Bridge(BridgeEvent),
}

impl From<BridgeEvent> for Event {
    fn from(event: BridgeEvent) -> Self {
        Event::Bridge(event)
    }
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Starts the terminal polling thread with the given tick rate.
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::Builder::new()
            .name("terminal-events".to_string())
            .spawn(move || {
                loop {
                    let event = if event::poll(tick_rate).unwrap_or(false) {
                        match event::read() {
                            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                            _ => continue,
                        }
                    } else {
                        Event::Tick
                    };
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self { rx, tx })
    }

    /// Handle for posting events from other threads.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}
