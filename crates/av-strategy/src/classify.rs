//! First-match card discovery
//!
//! Walks the discovery schema top down and stops at the first rule whose
//! match fields are all satisfied by the entity. The scan is linear in the
//! number of rules; schemas are tens of rules at most, so no index is
//! kept. Exhausting the schema without a match means the schema lacks a
//! catch-all — the caller treats that as fatal.

use av_core::AreaEntity;
use av_schema::DiscoveryRule;

/// Find the rule classifying `entity`, first match wins.
pub fn classify<'a>(entity: &AreaEntity, schema: &'a [DiscoveryRule]) -> Option<&'a DiscoveryRule> {
    schema.iter().find(|rule| rule.matcher.matches(entity))
}
