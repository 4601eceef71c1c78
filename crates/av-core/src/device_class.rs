//! Device classes consulted by the built-in schema
//!
//! The host defines many more classes than these; anything the schema does
//! not reason about explicitly is carried as [`DeviceClass::Other`] so new
//! host classes pass through matching instead of failing deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A host-defined subtype refining an entity's domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceClass {
    Temperature,
    Humidity,
    Motion,
    Door,
    Window,
    /// Any class without special handling here
    Other(String),
}

impl DeviceClass {
    /// The class's canonical string form, as used in match rules
    pub fn as_str(&self) -> &str {
        match self {
            DeviceClass::Temperature => "temperature",
            DeviceClass::Humidity => "humidity",
            DeviceClass::Motion => "motion",
            DeviceClass::Door => "door",
            DeviceClass::Window => "window",
            DeviceClass::Other(class) => class,
        }
    }
}

impl From<String> for DeviceClass {
    fn from(value: String) -> Self {
        match value.as_str() {
            "temperature" => DeviceClass::Temperature,
            "humidity" => DeviceClass::Humidity,
            "motion" => DeviceClass::Motion,
            "door" => DeviceClass::Door,
            "window" => DeviceClass::Window,
            _ => DeviceClass::Other(value),
        }
    }
}

impl From<&str> for DeviceClass {
    fn from(value: &str) -> Self {
        DeviceClass::from(value.to_string())
    }
}

impl From<DeviceClass> for String {
    fn from(class: DeviceClass) -> String {
        class.as_str().to_string()
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
