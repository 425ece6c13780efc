//! Per-device sample generation.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::bridge::{Sample, SampleSource};
use crate::model::{Device, Parameter};

use super::generator::{cell_text, random_value};
use super::sink::{TelemetryRecord, TelemetrySink};

/// Generates one value per device parameter on each call and optionally
/// publishes every value to a sink.
pub struct DeviceSampler {
    device_id: String,
    parameters: Vec<Parameter>,
    rng: StdRng,
    sink: Option<Box<dyn TelemetrySink>>,
    publish_failures: u64,
}

impl DeviceSampler {
    pub fn new(device: &Device) -> Self {
        Self {
            device_id: device.id.clone(),
            parameters: device.device_type.parameters.clone(),
            rng: StdRng::from_entropy(),
            sink: None,
            publish_failures: 0,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn TelemetrySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Number of records the sink rejected so far.
    pub fn publish_failures(&self) -> u64 {
        self.publish_failures
    }
}

impl SampleSource for DeviceSampler {
    fn sample(&mut self) -> Sample {
        let timestamp = Utc::now();
        let mut values = Vec::with_capacity(self.parameters.len());

        for param in &self.parameters {
            let value = random_value(param, &mut self.rng);
            values.push(cell_text(&value));

            if let Some(sink) = self.sink.as_mut() {
                let record = TelemetryRecord::new(timestamp, &self.device_id, &param.name, value);
                if let Err(e) = sink.publish(&record) {
                    self.publish_failures += 1;
                    warn!(
                        "Failed to publish {} for device {}: {}",
                        param.name, self.device_id, e
                    );
                }
            }
        }

        Sample { timestamp, values }
    }
}

impl std::fmt::Debug for DeviceSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSampler")
            .field("device_id", &self.device_id)
            .field("parameters", &self.parameters.len())
            .field("publishing", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceType, Display, ValueType};
    use crate::telemetry::sink::SinkError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        records: Arc<Mutex<Vec<TelemetryRecord>>>,
        fail: bool,
    }

    impl TelemetrySink for Recorder {
        fn publish(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
            if self.fail {
                return Err(SinkError::Io(std::io::Error::other("broker down")));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn pump() -> Device {
        let param = |name: &str, display_name: &str, unit: &str, value_type| Parameter {
            name: name.to_string(),
            display_name: display_name.to_string(),
            value_type,
            display: Display {
                unit: unit.to_string(),
            },
        };
        Device {
            id: "pump-7".to_string(),
            device_type: DeviceType {
                name: "pump".to_string(),
                parameters: vec![
                    param("v", "Voltage", "volt", ValueType::Float),
                    param("run", "Running", "", ValueType::Bool),
                    param("wave", "Vibration", "", ValueType::Waveform),
                ],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn sample_has_one_value_per_parameter() {
        let mut sampler = DeviceSampler::new(&pump()).with_rng(StdRng::seed_from_u64(42));
        let sample = sampler.sample();
        assert_eq!(sample.values.len(), 3);
        assert!(sample.values[0].parse::<f64>().is_ok());
        assert_eq!(sample.values[1], "true");
        assert_eq!(sample.values[2], "");
    }

    #[test]
    fn publishes_each_value_with_parameter_name() {
        let recorder = Recorder::default();
        let mut sampler = DeviceSampler::new(&pump())
            .with_rng(StdRng::seed_from_u64(42))
            .with_sink(Box::new(recorder.clone()));
        let sample = sampler.sample();

        let records = recorder.records.lock().unwrap();
        let params: Vec<&str> = records.iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(params, vec!["v", "run", "wave"]);
        assert!(records.iter().all(|r| r.device == "pump-7"));
        assert_eq!(records[1].value, serde_json::Value::Bool(true));
        let row = sample.into_row();
        assert_eq!(records[0].timestamp, row[0]);
    }

    #[test]
    fn publish_failures_do_not_stop_sampling() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut sampler = DeviceSampler::new(&pump()).with_sink(Box::new(recorder));
        let sample = sampler.sample();
        assert_eq!(sample.values.len(), 3);
        assert_eq!(sampler.publish_failures(), 3);
    }
}
