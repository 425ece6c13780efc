//! aware-core - shared library for the aware operator CLI.
//!
//! Provides:
//! - `table` - interactive table engine (cursor, viewport, focus, width balancing)
//! - `bridge` - single-slot append mailbox, producers and off-loop refresh
//! - `clipboard` - clipboard abstraction used by the table's copy command
//! - `model` - device, entity and device type models
//! - `source` - device inventory sources
//! - `telemetry` - synthetic telemetry values, sampling and publishing
//! - `view` - table data for device lists and telemetry feeds
//!
//! With `tui` feature (default):
//! - `tui` - terminal runtime (ratatui/crossterm), event loop, input, rendering

pub mod bridge;
pub mod clipboard;
pub mod model;
pub mod source;
pub mod table;
pub mod telemetry;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;
