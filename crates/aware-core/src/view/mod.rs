//! Table data for the CLI's views.

mod devices;
mod telemetry;

pub use devices::{DEVICE_COLUMNS, DeviceList, DisplayFormat};
pub use telemetry::telemetry_columns;
