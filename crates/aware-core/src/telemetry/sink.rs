//! Telemetry publishing.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Error type for telemetry publishing.
#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "I/O error: {}", e),
            SinkError::Encode(e) => write!(f, "Encode error: {}", e),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            SinkError::Encode(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        SinkError::Encode(e)
    }
}

/// One published parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub timestamp: String,
    pub device: String,
    pub parameter: String,
    pub value: Value,
}

impl TelemetryRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        device: impl Into<String>,
        parameter: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            device: device.into(),
            parameter: parameter.into(),
            value,
        }
    }
}

/// Destination for generated telemetry.
pub trait TelemetrySink: Send {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), SinkError>;
}

/// Appends records as JSON lines.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> TelemetrySink for JsonLinesSink<W> {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
