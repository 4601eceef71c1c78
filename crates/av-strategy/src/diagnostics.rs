//! Collection diagnostics
//!
//! Entities dropped during collection are recorded here, so the host and
//! the tests can observe skip decisions without capturing log output. The
//! collector is shared across concurrently-collected areas, hence the
//! interior mutability.

use std::sync::Mutex;

use tracing::{debug, warn};

/// Why an entity was dropped during collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Referenced by the area relation but absent from the state store
    NoState,
    /// Registered as a diagnostic or config entity
    DiagnosticEntity,
    /// Administratively disabled in the registry
    Disabled,
    /// Registered to a different area than the one being collected
    ForeignArea,
    /// No display name could be resolved
    Unnamed,
    /// Matched the view's exclusion list
    Excluded,
}

/// One recorded drop decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    pub entity_id: String,
    pub reason: SkipReason,
}

/// Collector for drop decisions, injected through the collection call chain.
#[derive(Debug, Default)]
pub struct Diagnostics {
    skipped: Mutex<Vec<SkippedEntity>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dropped entity.
    ///
    /// Data inconsistencies (missing state, unresolvable name) warn;
    /// ordinary filtering only logs at debug level.
    pub fn skipped(&self, entity_id: &str, reason: SkipReason) {
        match reason {
            SkipReason::NoState | SkipReason::Unnamed => {
                warn!(entity_id, ?reason, "dropping entity from area collection");
            }
            _ => {
                debug!(entity_id, ?reason, "dropping entity from area collection");
            }
        }
        if let Ok(mut skipped) = self.skipped.lock() {
            skipped.push(SkippedEntity {
                entity_id: entity_id.to_string(),
                reason,
            });
        }
    }

    /// All recorded drops, in record order
    pub fn entries(&self) -> Vec<SkippedEntity> {
        self.skipped
            .lock()
            .map(|skipped| skipped.clone())
            .unwrap_or_default()
    }

    /// Whether a drop was recorded for the given entity
    pub fn contains(&self, entity_id: &str) -> bool {
        self.entries()
            .iter()
            .any(|entry| entry.entity_id == entity_id)
    }
}
