//! Synthetic telemetry: value generation, per-device sampling and publishing.

mod generator;
mod sampler;
mod sink;

pub use generator::{cell_text, random_value};
pub use sampler::DeviceSampler;
pub use sink::{JsonLinesSink, SinkError, TelemetryRecord, TelemetrySink};
