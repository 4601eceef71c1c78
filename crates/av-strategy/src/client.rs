//! Host API surface
//!
//! The strategy runs as a guest inside a larger home-automation frontend;
//! everything it knows about areas, entities and live state arrives
//! through this trait. All queries are snapshot reads against the host's
//! registries — the engine never writes back.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use av_core::{AreaEntry, EntityEntry, EntityState};

/// A failed registry or state query.
#[derive(Debug, Clone, Error)]
#[error("{query} query failed: {message}")]
pub struct ApiError {
    /// Which query failed (e.g., "area_registry")
    pub query: String,
    /// Host-supplied failure detail
    pub message: String,
}

impl ApiError {
    pub fn new(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            message: message.into(),
        }
    }
}

/// Result type for host queries
pub type ApiResult<T> = Result<T, ApiError>;

/// Entity identifiers related to an area, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntities {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub automation: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scene: Vec<String>,
}

impl RelatedEntities {
    /// All identifiers across kinds, in a fixed kind order
    pub fn into_ids(self) -> impl Iterator<Item = String> {
        self.entity
            .into_iter()
            .chain(self.automation)
            .chain(self.script)
            .chain(self.scene)
    }
}

/// Read-only queries against the host's registries and state store.
#[async_trait]
pub trait HomeApi: Send + Sync {
    /// List all registered areas
    async fn area_registry(&self) -> ApiResult<Vec<AreaEntry>>;

    /// List all registered entities
    async fn entity_registry(&self) -> ApiResult<Vec<EntityEntry>>;

    /// Snapshot of all live entity states, keyed by entity_id
    async fn states(&self) -> ApiResult<HashMap<String, EntityState>>;

    /// Entity identifiers related to an area, grouped by kind
    async fn related_to_area(&self, area_id: &str) -> ApiResult<RelatedEntities>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_ids_kind_order() {
        let related = RelatedEntities {
            entity: vec!["light.kitchen".to_string()],
            automation: vec!["automation.lights".to_string()],
            script: vec![],
            scene: vec!["scene.dinner".to_string()],
        };
        let ids: Vec<String> = related.into_ids().collect();
        assert_eq!(ids, ["light.kitchen", "automation.lights", "scene.dinner"]);
    }

    #[test]
    fn test_missing_kinds_deserialize_empty() {
        let related: RelatedEntities =
            serde_json::from_str(r#"{"entity": ["light.kitchen"]}"#).unwrap();
        assert_eq!(related.entity.len(), 1);
        assert!(related.automation.is_empty());
    }
}
