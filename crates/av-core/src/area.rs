//! Area registry entries as read from the host

use serde::{Deserialize, Serialize};

/// A registered area (room, zone) in the home.
///
/// Read-only view of the host's area registry; only the fields the
/// strategy consumes are modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaEntry {
    /// Area identifier, used as the generated view's path
    pub area_id: String,

    /// Area name (e.g., "Living Room")
    pub name: String,

    /// Area icon (e.g., "mdi:sofa")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AreaEntry {
    /// Create a new area entry
    pub fn new(area_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            area_id: area_id.into(),
            name: name.into(),
            icon: None,
        }
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
