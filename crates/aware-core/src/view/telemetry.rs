//! Live telemetry feed view.

use crate::model::Device;
use crate::table::Column;

pub const TIME_COLUMN: &str = "Time";

/// Feed columns: sample time followed by each parameter's display name.
pub fn telemetry_columns(device: &Device) -> Vec<Column> {
    std::iter::once(Column::new(TIME_COLUMN))
        .chain(
            device
                .device_type
                .parameters
                .iter()
                .map(|p| Column::new(p.display_name.as_str())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceType, Parameter};

    #[test]
    fn time_column_comes_first() {
        let device = Device {
            device_type: DeviceType {
                parameters: vec![
                    Parameter {
                        display_name: "Voltage".into(),
                        ..Default::default()
                    },
                    Parameter {
                        display_name: "Running".into(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        let titles: Vec<String> = telemetry_columns(&device)
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Time", "Voltage", "Running"]);
    }

    #[test]
    fn device_without_parameters_has_only_time() {
        assert_eq!(telemetry_columns(&Device::default()).len(), 1);
    }
}
