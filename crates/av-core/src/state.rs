//! Live entity states as read from the host's state store

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DeviceClass;

/// The live state of one entity.
///
/// Only `attributes` is interpreted here (friendly name and device class);
/// everything else is opaque host data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// The state value (e.g., "on", "21.5", "unavailable")
    #[serde(default)]
    pub state: String,

    /// Attributes associated with the state
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl EntityState {
    /// Create a new state with the given value
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: HashMap::new(),
        }
    }

    /// Set an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the friendly name attribute
    pub fn with_friendly_name(self, name: impl Into<String>) -> Self {
        self.with_attribute("friendly_name", Value::String(name.into()))
    }

    /// Set the device class attribute
    pub fn with_device_class(self, class: impl Into<String>) -> Self {
        self.with_attribute("device_class", Value::String(class.into()))
    }

    /// The display name reported by the integration, if any
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(Value::as_str)
    }

    /// The device class reported by the integration, if any
    pub fn device_class(&self) -> Option<DeviceClass> {
        self.attributes
            .get("device_class")
            .and_then(Value::as_str)
            .map(DeviceClass::from)
    }
}
