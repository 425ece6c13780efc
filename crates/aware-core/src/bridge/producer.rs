//! Periodic background producers.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};

use crate::table::Row;

use super::{AppendHandle, BridgeEvent};

/// Granularity of the stop-signal check while waiting for the next tick.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One row's worth of generated values plus the time they were taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<String>,
}

impl Sample {
    /// Table row: RFC 3339 timestamp followed by the values.
    pub fn into_row(self) -> Row {
        let mut row = Vec::with_capacity(self.values.len() + 1);
        row.push(self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true));
        row.extend(self.values);
        row
    }
}

/// Value-generation collaborator invoked once per producer cycle.
pub trait SampleSource: Send + 'static {
    fn sample(&mut self) -> Sample;
}

/// Cooperative stop signal shared between a producer and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sleeps for `duration`, waking early on cancellation.
    /// Returns false if the token was cancelled.
    fn sleep(&self, duration: Duration) -> bool {
        let mut remaining = duration;
        while remaining > Duration::ZERO && !self.is_cancelled() {
            let step = remaining.min(STOP_POLL_INTERVAL);
            thread::sleep(step);
            remaining = remaining.saturating_sub(step);
        }
        !self.is_cancelled()
    }
}

/// Background thread that samples a source every `period` and publishes the
/// resulting row through an [`AppendHandle`].
///
/// A table must be fed by at most one producer: the append slot holds a single
/// row and concurrent writers would overwrite each other.
pub struct Producer {
    name: String,
    cancel: CancelToken,
    handle: Option<JoinHandle<()>>,
}

impl Producer {
    /// Spawns the producer thread. The first sample is taken one period after start.
    pub fn spawn<S, E>(
        name: &str,
        mut source: S,
        period: Duration,
        output: AppendHandle<E>,
    ) -> io::Result<Self>
    where
        S: SampleSource,
        E: From<BridgeEvent> + Send + 'static,
    {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let thread_name = name.to_string();

        let handle = thread::Builder::new()
            .name(format!("producer-{name}"))
            .spawn(move || {
                debug!("producer {} started, period {:?}", thread_name, period);
                let mut cycles: u64 = 0;
                while token.sleep(period) {
                    let row = source.sample().into_row();
                    if output.publish(row).is_err() {
                        debug!("producer {}: event loop closed", thread_name);
                        break;
                    }
                    cycles += 1;
                }
                debug!("producer {} stopped after {} cycles", thread_name, cycles);
            })?;

        info!("Producer {} running every {:?}", name, period);
        Ok(Self {
            name: name.to_string(),
            cancel,
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signals the producer to stop and waits for its thread to exit.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("producer {} panicked", self.name);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("name", &self.name)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::AppendSlot;
    use chrono::TimeZone;
    use std::sync::mpsc;
    use std::time::Instant;

    struct Counter(u32);

    impl SampleSource for Counter {
        fn sample(&mut self) -> Sample {
            self.0 += 1;
            Sample {
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                values: vec![self.0.to_string()],
            }
        }
    }

    #[test]
    fn sample_row_starts_with_timestamp() {
        let sample = Sample {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap(),
            values: vec!["231.5".into(), "true".into()],
        };
        assert_eq!(
            sample.into_row(),
            vec!["2024-05-01T12:30:05Z", "231.5", "true"]
        );
    }

    #[test]
    fn producer_signals_and_stages_rows() {
        let (tx, rx) = mpsc::channel::<BridgeEvent>();
        let slot = AppendSlot::new();
        let mut producer = Producer::spawn(
            "test",
            Counter(0),
            Duration::from_millis(10),
            AppendHandle::new(slot.clone(), tx),
        )
        .unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, BridgeEvent::AppendReady));
        producer.stop();

        let row = slot.take().unwrap();
        assert_eq!(row[0], "2024-05-01T12:00:00Z");
        assert!(row[1].parse::<u32>().unwrap() >= 1);
    }

    #[test]
    fn stop_interrupts_long_period() {
        let (tx, _rx) = mpsc::channel::<BridgeEvent>();
        let mut producer = Producer::spawn(
            "slow",
            Counter(0),
            Duration::from_secs(3600),
            AppendHandle::new(AppendSlot::new(), tx),
        )
        .unwrap();
        assert!(producer.is_running());

        let started = Instant::now();
        producer.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!producer.is_running());
    }

    #[test]
    fn cancelled_token_skips_sleep() {
        let token = CancelToken::new();
        token.cancel();
        assert!(!token.sleep(Duration::from_secs(3600)));
    }
}
