use serde::{Deserialize, Serialize};

/// A registered device as returned when listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub id: String,
    pub display_name: String,
    pub device_type: DeviceType,
    pub is_active: bool,
    pub is_enabled: bool,
    pub parent_entity: Entity,
    pub organisation: String,
}

/// Device type with the parameters its devices report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

/// One reported parameter of a device type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    pub name: String,
    pub display_name: String,
    pub value_type: ValueType,
    pub display: Display,
}

/// How a parameter is presented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    /// Unit slug, e.g. "volt" or "degrees-celsius". Empty when unitless.
    pub unit: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Float,
    Bool,
    String,
    Object,
    Waveform,
    Spectrum,
}

/// Node of the entity tree a device is attached to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub parent_entity: Option<Box<Entity>>,
}

impl Entity {
    /// Full path of the entity, root first, joined by spaces
    /// (e.g. "Plant Conveyor Motor").
    pub fn hierarchy_name(&self) -> String {
        let mut names = vec![self.name.as_str()];
        let mut current = self.parent_entity.as_deref();
        while let Some(parent) = current {
            names.push(parent.name.as_str());
            current = parent.parent_entity.as_deref();
        }
        names.reverse();
        names.join(" ")
    }
}
