//! Common test utilities for the area views strategy
//!
//! Provides an in-memory mock of the host API with builder-style setup,
//! so tests can describe a whole home in a few lines.

use std::collections::HashMap;

use async_trait::async_trait;

use av_core::{AreaEntry, EntityEntry, EntityState};
use av_strategy::{ApiError, ApiResult, HomeApi, RelatedEntities};

/// In-memory host with areas, registry entries, states and relations.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    areas: Vec<AreaEntry>,
    registry: Vec<EntityEntry>,
    states: HashMap<String, EntityState>,
    related: HashMap<String, RelatedEntities>,
    fail_states: bool,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an area
    pub fn with_area(mut self, area: AreaEntry) -> Self {
        self.areas.push(area);
        self
    }

    /// Add a registry entry
    pub fn with_registry_entry(mut self, entry: EntityEntry) -> Self {
        self.registry.push(entry);
        self
    }

    /// Add a live state
    pub fn with_state(mut self, entity_id: impl Into<String>, state: EntityState) -> Self {
        self.states.insert(entity_id.into(), state);
        self
    }

    /// Relate entities of the `entity` kind to an area
    pub fn with_related(mut self, area_id: impl Into<String>, entity_ids: &[&str]) -> Self {
        let related = self.related.entry(area_id.into()).or_default();
        related
            .entity
            .extend(entity_ids.iter().map(|id| id.to_string()));
        self
    }

    /// Make the states query fail
    pub fn with_failing_states(mut self) -> Self {
        self.fail_states = true;
        self
    }

    /// Convenience: one named, stateful entity related to an area
    pub fn with_entity(self, area_id: &str, entity_id: &str, state: EntityState) -> Self {
        self.with_related(area_id, &[entity_id])
            .with_state(entity_id, state)
    }
}

#[async_trait]
impl HomeApi for MockApi {
    async fn area_registry(&self) -> ApiResult<Vec<AreaEntry>> {
        Ok(self.areas.clone())
    }

    async fn entity_registry(&self) -> ApiResult<Vec<EntityEntry>> {
        Ok(self.registry.clone())
    }

    async fn states(&self) -> ApiResult<HashMap<String, EntityState>> {
        if self.fail_states {
            return Err(ApiError::new("states", "connection lost"));
        }
        Ok(self.states.clone())
    }

    async fn related_to_area(&self, area_id: &str) -> ApiResult<RelatedEntities> {
        Ok(self.related.get(area_id).cloned().unwrap_or_default())
    }
}
