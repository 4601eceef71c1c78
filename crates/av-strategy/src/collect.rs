//! Area entity collection
//!
//! Builds the entity list one area view is generated from: the host's
//! related-entities relation, widened by `include` patterns, narrowed by
//! registry filters and the `exclude` list, with display names resolved
//! and the area name stripped out of them. Output order follows candidate
//! insertion order; the layout builder sorts by name downstream.

use std::collections::HashMap;

use indexmap::IndexSet;

use av_core::{domain_of, matcher, AreaEntity, AreaEntry, EntityCategory, EntityEntry, EntityState};

use crate::client::HomeApi;
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::error::StrategyResult;

/// Collect all entities belonging to an area.
///
/// `registry` and `states` are the shared snapshot fetched once per
/// dashboard generation; only the related-entities relation is queried
/// here, so collection for different areas can run concurrently.
pub async fn collect_area_entities<A: HomeApi + ?Sized>(
    api: &A,
    area: &AreaEntry,
    registry: &HashMap<String, EntityEntry>,
    states: &HashMap<String, EntityState>,
    include: Vec<String>,
    exclude: Vec<String>,
    diag: &Diagnostics,
) -> StrategyResult<Vec<AreaEntity>> {
    let related = api.related_to_area(&area.area_id).await?;

    // union across kinds, deduplicated, insertion order kept
    let mut candidates: IndexSet<String> = related.into_ids().collect();

    // include patterns may pull in entities outside the area relation
    for pattern in &include {
        if states.contains_key(pattern) {
            candidates.insert(pattern.clone());
            continue;
        }
        let mut hits: Vec<&String> = states
            .keys()
            .filter(|entity_id| matcher::matches(pattern, entity_id))
            .collect();
        // the state store iterates in arbitrary order
        hits.sort();
        for hit in hits {
            candidates.insert(hit.clone());
        }
    }

    let mut entities = Vec::new();
    for entity_id in candidates {
        let Some(state) = states.get(&entity_id) else {
            diag.skipped(&entity_id, SkipReason::NoState);
            continue;
        };

        let entry = registry.get(&entity_id);
        if let Some(entry) = entry {
            if matches!(
                entry.entity_category,
                Some(EntityCategory::Diagnostic | EntityCategory::Config)
            ) {
                diag.skipped(&entity_id, SkipReason::DiagnosticEntity);
                continue;
            }
            if entry.is_disabled() {
                diag.skipped(&entity_id, SkipReason::Disabled);
                continue;
            }
            if entry
                .area_id
                .as_deref()
                .is_some_and(|area_id| area_id != area.area_id)
            {
                diag.skipped(&entity_id, SkipReason::ForeignArea);
                continue;
            }
        }

        let name = state
            .friendly_name()
            .map(str::to_string)
            .or_else(|| entry.and_then(|entry| entry.name.clone()));
        let Some(name) = name else {
            diag.skipped(&entity_id, SkipReason::Unnamed);
            continue;
        };

        let domain = domain_of(&entity_id).to_string();
        let device_class = state.device_class();

        let mut facets: Vec<&str> = vec![&domain];
        if let Some(class) = &device_class {
            facets.push(class.as_str());
        }
        facets.push(&name);
        facets.push(&entity_id);
        if matcher::matches_any(&exclude, &facets) {
            diag.skipped(&entity_id, SkipReason::Excluded);
            continue;
        }

        let name = cleanup_name(&name, &area.name);
        entities.push(AreaEntity {
            domain,
            name,
            device_class,
            entity_id,
        });
    }

    Ok(entities)
}

/// Strip the area name out of an entity's display name.
///
/// Removal is repeated literal substring replacement, case-insensitive,
/// covering the separators integrations commonly use ("Kitchen: Light",
/// "Light - Kitchen", "Kitchen Light"). The search is a plain substring
/// match, so an area name that happens to be part of an unrelated word is
/// stripped as well. A name that would end up empty is left unstripped.
fn cleanup_name(name: &str, area_name: &str) -> String {
    if area_name.is_empty() {
        return name.to_string();
    }
    let mut result = name.to_string();
    for needle in [
        format!("{area_name}: "),
        format!(": {area_name}"),
        format!("{area_name} - "),
        format!(" - {area_name}"),
        format!("{area_name} "),
        format!(" {area_name}"),
    ] {
        result = remove_all_ignore_case(&result, &needle);
    }
    let result = result.trim();
    if result.is_empty() {
        name.to_string()
    } else {
        result.to_string()
    }
}

fn remove_all_ignore_case(haystack: &str, needle: &str) -> String {
    let needle_lower = needle.to_lowercase();
    if needle_lower.is_empty() {
        return haystack.to_string();
    }
    let mut result = haystack.to_string();
    loop {
        let lower = result.to_lowercase();
        let Some(start) = lower.find(&needle_lower) else {
            break;
        };
        let end = start + needle_lower.len();
        // case folding can shift byte offsets for non-ASCII names; bail out
        // rather than splitting a character
        if !result.is_char_boundary(start) || !result.is_char_boundary(end) || end > result.len() {
            break;
        }
        result.replace_range(start..end, "");
    }
    result
}
