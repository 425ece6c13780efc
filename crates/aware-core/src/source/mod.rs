//! Device inventory sources.

mod json_file;

pub use json_file::JsonFileSource;

use crate::model::Device;

/// Error type for device source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// I/O error while reading the inventory.
    Io(String),
    /// The inventory could not be decoded.
    Parse(String),
    /// No device with the requested id.
    NotFound(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io(msg) => write!(f, "I/O error: {}", msg),
            SourceError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SourceError::NotFound(id) => write!(f, "device {} not found", id),
        }
    }
}

impl std::error::Error for SourceError {}

/// Abstraction over where device records come from.
///
/// Object-safe and shareable across threads so the table's refresh worker can
/// hold an `Arc<dyn DeviceSource>`.
pub trait DeviceSource: Send + Sync {
    /// Returns every visible device.
    fn list_devices(&self) -> Result<Vec<Device>, SourceError>;

    /// Returns the device with the given id.
    fn get_device(&self, id: &str) -> Result<Device, SourceError> {
        self.list_devices()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}
