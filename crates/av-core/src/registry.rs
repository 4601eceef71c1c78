//! Entity registry entries as read from the host

use serde::{Deserialize, Serialize};

/// Reason an entity was disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledBy {
    /// Disabled by a config entry
    ConfigEntry,
    /// Disabled by device
    Device,
    /// Disabled by the host itself
    Hass,
    /// Disabled by the integration
    Integration,
    /// Disabled by the user
    User,
}

/// Entity category
///
/// Diagnostic and config entities are hidden from generated dashboards.
/// Categories this engine does not know about are carried verbatim in
/// [`EntityCategory::Other`] and treated as regular entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityCategory {
    /// Configuration entity
    Config,
    /// Diagnostic entity
    Diagnostic,
    /// Any category introduced by the host after this was written
    Other(String),
}

impl From<String> for EntityCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "config" => EntityCategory::Config,
            "diagnostic" => EntityCategory::Diagnostic,
            _ => EntityCategory::Other(value),
        }
    }
}

impl From<EntityCategory> for String {
    fn from(category: EntityCategory) -> String {
        match category {
            EntityCategory::Config => "config".to_string(),
            EntityCategory::Diagnostic => "diagnostic".to_string(),
            EntityCategory::Other(category) => category,
        }
    }
}

/// A registered entity entry
///
/// Read-only view of the host's entity registry, trimmed to the fields the
/// collector consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEntry {
    /// Full entity ID (domain.object_id)
    pub entity_id: String,

    /// User-set name, the fallback when a live state has no friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Assigned area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,

    /// Disable reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_by: Option<DisabledBy>,

    /// Entity category (config, diagnostic, or none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,
}

impl EntityEntry {
    /// Create a new entity entry
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            name: None,
            area_id: None,
            disabled_by: None,
            entity_category: None,
        }
    }

    /// Set the registry name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Assign the entity to an area
    pub fn in_area(mut self, area_id: impl Into<String>) -> Self {
        self.area_id = Some(area_id.into());
        self
    }

    /// Mark the entity disabled
    pub fn disabled(mut self, disabled_by: DisabledBy) -> Self {
        self.disabled_by = Some(disabled_by);
        self
    }

    /// Set the entity category
    pub fn with_category(mut self, category: EntityCategory) -> Self {
        self.entity_category = Some(category);
        self
    }

    /// Get the domain from entity_id
    pub fn domain(&self) -> &str {
        crate::entity::domain_of(&self.entity_id)
    }

    /// Check if entity is disabled
    pub fn is_disabled(&self) -> bool {
        self.disabled_by.is_some()
    }
}
