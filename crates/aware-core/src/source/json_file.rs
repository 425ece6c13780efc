use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::Device;

use super::{DeviceSource, SourceError};

/// Reads a JSON array of devices from a file.
///
/// The file is re-read on every call so that a manual refresh picks up edits.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceSource for JsonFileSource {
    fn list_devices(&self) -> Result<Vec<Device>, SourceError> {
        let file = File::open(&self.path)
            .map_err(|e| SourceError::Io(format!("{}: {}", self.path.display(), e)))?;
        let devices: Vec<Device> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SourceError::Parse(format!("{}: {}", self.path.display(), e)))?;
        debug!("loaded {} devices from {}", devices.len(), self.path.display());
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn inventory(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const TWO_DEVICES: &str = r#"[
        {"id": "a1", "displayName": "Meter A"},
        {"id": "b2", "displayName": "Meter B", "isEnabled": true}
    ]"#;

    #[test]
    fn lists_devices_in_file_order() {
        let file = inventory(TWO_DEVICES);
        let source = JsonFileSource::new(file.path());
        let devices = source.list_devices().unwrap();
        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2"]);
    }

    #[test]
    fn get_device_by_id() {
        let file = inventory(TWO_DEVICES);
        let source = JsonFileSource::new(file.path());
        assert_eq!(source.get_device("b2").unwrap().display_name, "Meter B");
        assert_eq!(
            source.get_device("zz"),
            Err(SourceError::NotFound("zz".to_string()))
        );
    }

    #[test]
    fn rereads_file_on_every_call() {
        let mut file = inventory(r#"[{"id": "a1"}]"#);
        let source = JsonFileSource::new(file.path());
        assert_eq!(source.list_devices().unwrap().len(), 1);

        file.as_file_mut().set_len(0).unwrap();
        std::fs::write(file.path(), TWO_DEVICES).unwrap();
        assert_eq!(source.list_devices().unwrap().len(), 2);
    }

    #[test]
    fn reports_missing_file_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonFileSource::new(dir.path().join("nope.json"));
        assert!(matches!(missing.list_devices(), Err(SourceError::Io(_))));

        let file = inventory("{not json");
        let bad = JsonFileSource::new(file.path());
        assert!(matches!(bad.list_devices(), Err(SourceError::Parse(_))));
    }
}
