//! Device inventory models.
//!
//! Field names follow the management service's camelCase JSON.

mod device;

pub use device::{Device, DeviceType, Display, Entity, Parameter, ValueType};
