//! Collected entity descriptors

use serde::{Deserialize, Serialize};

use crate::DeviceClass;

/// Get the domain prefix of an entity identifier.
///
/// Identifiers are `domain.object_id`; an identifier without a separator is
/// returned whole.
pub fn domain_of(entity_id: &str) -> &str {
    entity_id.split('.').next().unwrap_or(entity_id)
}

/// One entity of an area, ready for card discovery.
///
/// Produced by the collector after filtering and name resolution; this is
/// the shape the discovery rules match against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaEntity {
    /// Full entity ID (domain.object_id)
    pub entity_id: String,

    /// Domain prefix of the identifier
    pub domain: String,

    /// Resolved display name, with the area name stripped
    pub name: String,

    /// Device class from the live state, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
}

impl AreaEntity {
    /// Create a descriptor, deriving the domain from the identifier
    pub fn new(entity_id: impl Into<String>, name: impl Into<String>) -> Self {
        let entity_id = entity_id.into();
        Self {
            domain: domain_of(&entity_id).to_string(),
            entity_id,
            name: name.into(),
            device_class: None,
        }
    }

    /// Set the device class
    pub fn with_device_class(mut self, class: impl Into<DeviceClass>) -> Self {
        self.device_class = Some(class.into());
        self
    }
}
