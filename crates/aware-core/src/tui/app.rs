//! Main TUI application.

use std::io;
use std::sync::mpsc::Sender;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, info, warn};

use crate::bridge::{BridgeEvent, Producer, RefreshWorker};
use crate::clipboard::Clipboard;
use crate::table::{TableData, TableState, chrome_height};

use super::clipboard::Osc52Clipboard;
use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;

/// Full-screen table application.
///
/// Owns the table, the producers feeding it and the clipboard. All table
/// mutations happen in [`App::handle_event`] on the loop thread.
pub struct App {
    table: TableState,
    producers: Vec<Producer>,
    clipboard: Box<dyn Clipboard>,
    refresh: RefreshWorker,
    status: Option<String>,
    size: (u16, u16),
    should_quit: bool,
}

impl App {
    pub fn new(table: TableState) -> Self {
        Self {
            table,
            producers: Vec::new(),
            clipboard: Box::new(Osc52Clipboard::stdout()),
            refresh: RefreshWorker::new(),
            status: None,
            size: (0, 0),
            should_quit: false,
        }
    }

    /// Hands a producer to the app; it is stopped when the app quits.
    pub fn with_producer(mut self, producer: Producer) -> Self {
        self.producers.push(producer);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn producers(&self) -> &[Producer] {
        &self.producers
    }

    /// Runs the TUI until quit. The terminal is restored and producers are
    /// stopped even when the loop fails.
    pub fn run(mut self, events: EventHandler) -> io::Result<()> {
        enable_raw_mode()?;
        let result = execute!(io::stdout(), EnterAlternateScreen)
            .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())))
            .and_then(|mut terminal| self.event_loop(&mut terminal, &events));

        self.stop_producers();
        let restored = restore_terminal();
        result.and(restored)
    }

    fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &EventHandler,
    ) -> io::Result<()> {
        let tx = events.sender();

        let size = terminal.size()?;
        self.handle_event(Event::Resize(size.width, size.height), &tx);

        loop {
            terminal.draw(|frame| render(frame, &self.table, self.status.as_deref()))?;

            match events.next() {
                Ok(event) => self.handle_event(event, &tx),
                Err(_) => self.quit(),
            }

            if self.should_quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    }

    /// Applies one event to the table.
    pub fn handle_event(&mut self, event: Event, tx: &Sender<Event>) {
        match event {
            Event::Tick => {}
            Event::Key(key) => match handle_key(&mut self.table, key) {
                KeyAction::Quit => self.quit(),
                KeyAction::Refresh => self.request_refresh(tx),
                KeyAction::Copy => self.copy(),
                KeyAction::Execute => self.execute(),
                KeyAction::ToggleHelp => {
                    self.table.toggle_help();
                    self.layout();
                }
                KeyAction::None => {}
            },
            Event::Resize(width, height) => {
                self.size = (width, height);
                self.layout();
            }
            Event::Bridge(BridgeEvent::AppendReady) => {
                if let Err(e) = self.table.append_row() {
                    warn!("Dropped appended row: {}", e);
                    self.status = Some(e.to_string());
                }
            }
            Event::Bridge(BridgeEvent::Refreshed(result)) => {
                self.refresh.complete();
                self.apply_refresh(result);
            }
        }
    }

    /// Sizes the table body to the terminal minus headers, footer and help.
    fn layout(&mut self) {
        let (width, height) = self.size;
        let body = (height as usize).saturating_sub(chrome_height(self.table.help_visible()));
        self.table.resize(width as usize, body);
    }

    fn request_refresh(&mut self, tx: &Sender<Event>) {
        let Some(fetch) = self.table.refresh_fn().cloned() else {
            self.status = Some("Nothing to refresh".to_string());
            return;
        };
        match self.refresh.request(fetch, tx.clone()) {
            Ok(true) => self.status = Some("Refreshing…".to_string()),
            Ok(false) => debug!("refresh already in flight"),
            Err(e) => {
                warn!("Failed to start refresh: {}", e);
                self.status = Some(format!("Refresh failed: {}", e));
            }
        }
    }

    fn apply_refresh(&mut self, result: Result<TableData, String>) {
        let outcome = result.and_then(|data| {
            let rows = data.rows.len();
            self.table.set_data(data).map(|_| rows).map_err(|e| e.to_string())
        });
        match outcome {
            Ok(rows) => {
                debug!("refreshed table with {} rows", rows);
                self.status = Some(format!("Refreshed {} rows", rows));
            }
            Err(msg) => {
                warn!("Refresh failed: {}", msg);
                self.status = Some(format!("Refresh failed: {}", msg));
            }
        }
    }

    fn copy(&mut self) {
        if !self.table.is_focused() {
            return;
        }
        self.status = Some(match self.table.copy_to_clipboard(self.clipboard.as_mut()) {
            Ok(value) => format!("Copied {}", value),
            Err(e) => {
                warn!("Copy failed: {}", e);
                e.to_string()
            }
        });
    }

    fn execute(&mut self) {
        if !self.table.is_focused() {
            return;
        }
        if let Some(row) = self.table.selected_row()
            && let Some(label) = row.get(1).or_else(|| row.first())
        {
            self.status = Some(format!("Selected {}", label));
        }
    }

    /// Marks the app for exit and stops every producer it owns.
    fn quit(&mut self) {
        self.should_quit = true;
        self.stop_producers();
    }

    fn stop_producers(&mut self) {
        for producer in &mut self.producers {
            debug!("stopping producer {}", producer.name());
            producer.stop();
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{AppendHandle, AppendSlot, Sample, SampleSource};
    use crate::clipboard::MemoryClipboard;
    use crate::table::{Column, RefreshFn, TableOptions};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![format!("id-{i}"), format!("name-{i}")]).collect()
    }

    fn app_with(options: TableOptions) -> App {
        let table = options
            .columns(vec![Column::new("UID"), Column::new("Name")])
            .focused(true)
            .build()
            .unwrap();
        App::new(table).with_clipboard(Box::new(MemoryClipboard::default()))
    }

    #[test]
    fn resize_reserves_chrome() {
        let (tx, _rx) = mpsc::channel();
        let mut app = app_with(TableOptions::new().rows(rows(3)));
        app.handle_event(Event::Resize(80, 24), &tx);
        assert_eq!(app.table().viewport().height, 24 - chrome_height(false));

        app.handle_event(key(KeyCode::Char('?')), &tx);
        assert!(app.table().help_visible());
        assert_eq!(app.table().viewport().height, 24 - chrome_height(true));
    }

    #[test]
    fn append_ready_consumes_slot() {
        let (tx, rx) = mpsc::channel::<Event>();
        let slot = AppendSlot::new();
        let mut app = app_with(
            TableOptions::new()
                .rows(rows(2))
                .sticky_cursor(true)
                .appending(slot.clone()),
        );
        app.handle_event(Event::Resize(80, 24), &tx);
        app.handle_event(key(KeyCode::Char('G')), &tx);

        let handle = AppendHandle::new(slot, tx.clone());
        handle.publish(vec!["t1".into(), "first".into()]).unwrap();
        handle.publish(vec!["t2".into(), "second".into()]).unwrap();

        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        for event in events {
            app.handle_event(event, &tx);
        }
        assert_eq!(app.table().len(), 3);
        assert_eq!(app.table().rows()[2][1], "second");
        assert_eq!(app.table().cursor(), 2);
    }

    #[test]
    fn refresh_runs_off_loop_and_applies_result() {
        let (tx, rx) = mpsc::channel::<Event>();
        let fetch: RefreshFn = Arc::new(|| {
            Ok(TableData {
                columns: vec![Column::new("UID"), Column::new("Name")],
                rows: vec![vec!["new".into(), "row".into()]],
            })
        });
        let mut app = app_with(TableOptions::new().rows(rows(5)).refresh(fetch));

        app.handle_event(key(KeyCode::Char('r')), &tx);
        assert_eq!(app.status(), Some("Refreshing…"));
        // Second request while in flight is ignored.
        app.handle_event(key(KeyCode::Char('r')), &tx);

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        app.handle_event(event, &tx);
        assert_eq!(app.table().len(), 1);
        assert_eq!(app.status(), Some("Refreshed 1 rows"));
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn refresh_failure_is_reported() {
        let (tx, _rx) = mpsc::channel();
        let mut app = app_with(TableOptions::new().rows(rows(2)));
        app.handle_event(
            Event::Bridge(BridgeEvent::Refreshed(Err("timeout".into()))),
            &tx,
        );
        assert_eq!(app.status(), Some("Refresh failed: timeout"));
        assert_eq!(app.table().len(), 2);

        app.handle_event(key(KeyCode::Char('r')), &tx);
        assert_eq!(app.status(), Some("Nothing to refresh"));
    }

    #[test]
    fn execute_and_copy_report_in_status() {
        let (tx, _rx) = mpsc::channel();
        let mut app = app_with(TableOptions::new().rows(rows(3)));
        app.handle_event(key(KeyCode::Char('j')), &tx);

        app.handle_event(key(KeyCode::Enter), &tx);
        assert_eq!(app.status(), Some("Selected name-1"));

        app.handle_event(key(KeyCode::Char('c')), &tx);
        assert_eq!(app.status(), Some("Copied id-1"));
    }

    #[test]
    fn blurred_table_ignores_execute_and_copy() {
        let (tx, _rx) = mpsc::channel();
        let mut app = app_with(TableOptions::new().rows(rows(3)));
        app.handle_event(key(KeyCode::Esc), &tx);
        app.handle_event(key(KeyCode::Enter), &tx);
        app.handle_event(key(KeyCode::Char('c')), &tx);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn copy_on_empty_table_is_not_fatal() {
        let (tx, _rx) = mpsc::channel();
        let mut app = app_with(TableOptions::new());
        app.handle_event(key(KeyCode::Char('c')), &tx);
        assert_eq!(app.status(), Some("nothing to copy: table is empty"));
        assert!(!app.should_quit());
    }

    #[test]
    fn quit_key() {
        let (tx, _rx) = mpsc::channel();
        let mut app = app_with(TableOptions::new());
        app.handle_event(key(KeyCode::Char('q')), &tx);
        assert!(app.should_quit());
    }

    struct Ticker;

    impl SampleSource for Ticker {
        fn sample(&mut self) -> Sample {
            Sample {
                timestamp: chrono::Utc::now(),
                values: vec!["tick".into()],
            }
        }
    }

    #[test]
    fn quit_stops_producers() {
        let (tx, _rx) = mpsc::channel::<Event>();
        let slot = AppendSlot::new();
        let producer = Producer::spawn(
            "ticker",
            Ticker,
            Duration::from_millis(20),
            AppendHandle::new(slot.clone(), tx.clone()),
        )
        .unwrap();
        let mut app = app_with(TableOptions::new().rows(rows(1)).appending(slot))
            .with_producer(producer);
        assert!(app.producers()[0].is_running());

        app.handle_event(key(KeyCode::Char('q')), &tx);
        assert!(app.should_quit());
        assert!(!app.producers()[0].is_running());
    }
}
