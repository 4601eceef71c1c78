//! Dashboard assembly
//!
//! Orchestrates a full generation pass: fetch the registry snapshot,
//! collect every area's entities concurrently, then build the home view
//! and one view per area and splice them into the host's dashboard
//! configuration. Generation is idempotent — the same snapshot and
//! configuration produce the same dashboard.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use av_core::{compare_names, AreaEntry, EntityEntry, JsonObject};
use av_schema::{
    default_discovery_schema, default_exclude, default_group_schema, DiscoveryRule,
    GroupDefinition,
};

use crate::client::HomeApi;
use crate::collect::collect_area_entities;
use crate::config::{
    resolve_bool, resolve_list, resolve_option, resolve_optional_string, resolve_string,
    resolve_strings, ConfigValue, DashboardConfig,
};
use crate::diagnostics::Diagnostics;
use crate::error::{StrategyError, StrategyResult};
use crate::home::{build_home_view, AreaViewContext};
use crate::layout::{build_area_view, header_card, ViewMeta};

/// Path of the synthesized home view
pub const DEFAULT_VIEW_PATH: &str = "default_view";

/// Icon used when neither configuration nor the area registry supplies one
const DEFAULT_VIEW_ICON: &str = "mdi:home-assistant";

/// The dashboard generation strategy.
pub struct AreaViewsStrategy;

impl AreaViewsStrategy {
    /// Generate the dashboard.
    ///
    /// Returns a copy of `config` with its views replaced: the home view
    /// first, the generated area views in alphabetical title order, then
    /// any user-authored views not shadowed by a generated path.
    pub async fn generate_dashboard<A: HomeApi + ?Sized>(
        api: &A,
        config: &DashboardConfig,
        locale: &str,
        diag: &Diagnostics,
    ) -> StrategyResult<DashboardConfig> {
        let (areas, registry_entries, states) = futures::try_join!(
            api.area_registry(),
            api.entity_registry(),
            api.states()
        )?;

        let registry: HashMap<String, EntityEntry> = registry_entries
            .into_iter()
            .map(|entry| (entry.entity_id.clone(), entry))
            .collect();

        // per-area collection has no ordering dependency, run it concurrently
        let registry = &registry;
        let states = &states;
        let collections = futures::future::try_join_all(areas.iter().map(|area| {
            let include = resolve_strings(config, &area.area_id, "include", Vec::new());
            let exclude = resolve_strings(config, &area.area_id, "exclude", default_exclude());
            async move {
                collect_area_entities(api, area, registry, states, include, exclude, diag).await
            }
        }))
        .await?;

        let mut area_views: Vec<AreaViewContext> = areas
            .iter()
            .zip(collections)
            .map(|(area, entities)| AreaViewContext {
                meta: area_view_meta(config, area),
                entities,
                motion_entity: resolve_optional_string(config, &area.area_id, "motion_entity"),
            })
            .collect();
        area_views.sort_by(|a, b| compare_names(&a.meta.title, &b.meta.title));

        let home_meta = ViewMeta::new(
            DEFAULT_VIEW_PATH,
            resolve_string(config, DEFAULT_VIEW_PATH, "title", "Home"),
            resolve_string(config, DEFAULT_VIEW_PATH, "icon", DEFAULT_VIEW_ICON),
        );

        // user-authored views whose path no generated view shadows
        let user_views: Vec<JsonObject> = config
            .views
            .iter()
            .filter(|view| match view.get("path").and_then(Value::as_str) {
                Some(path) => {
                    path != DEFAULT_VIEW_PATH && !areas.iter().any(|area| area.area_id == path)
                }
                None => true,
            })
            .cloned()
            .collect();

        // selector entries for the header card, in final view order
        let mut selector: Vec<ViewMeta> = Vec::with_capacity(1 + area_views.len());
        selector.push(home_meta.clone());
        selector.extend(area_views.iter().map(|view| view.meta.clone()));
        for view in &user_views {
            selector.push(ViewMeta::new(
                view.get("path").and_then(Value::as_str).unwrap_or_default(),
                view.get("title").and_then(Value::as_str).unwrap_or_default(),
                view.get("icon")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_VIEW_ICON),
            ));
        }

        let mut views: Vec<JsonObject> = Vec::with_capacity(selector.len());

        let home_groups = resolved_group_schema(config, DEFAULT_VIEW_PATH)?;
        let home_cards = build_home_view(
            header_card(
                &selector,
                &home_meta,
                resolve_bool(config, DEFAULT_VIEW_PATH, "disable_menu", false),
            ),
            &area_views,
            &home_groups,
            resolve_bool(config, DEFAULT_VIEW_PATH, "compact", false),
            &resolve_list(config, DEFAULT_VIEW_PATH, "cards", Vec::new()),
        );
        views.push(view_object(config, &home_meta, home_cards));

        for area_view in &area_views {
            let path = &area_view.meta.path;
            let groups = resolved_group_schema(config, path)?;
            let discovery = resolved_discovery_schema(config, path)?;
            let header = header_card(
                &selector,
                &area_view.meta,
                resolve_bool(config, path, "disable_menu", false),
            );
            let cards = build_area_view(
                header,
                &area_view.entities,
                &discovery,
                &groups,
                &resolve_list(config, path, "cards", Vec::new()),
                locale,
            )?;
            views.push(view_object(config, &area_view.meta, cards));
        }

        views.extend(user_views);

        let mut generated = config.clone();
        generated.views = views;
        Ok(generated)
    }
}

fn area_view_meta(config: &DashboardConfig, area: &AreaEntry) -> ViewMeta {
    let default_icon = area.icon.as_deref().unwrap_or(DEFAULT_VIEW_ICON);
    ViewMeta::new(
        area.area_id.clone(),
        resolve_string(config, &area.area_id, "title", &area.name),
        resolve_string(config, &area.area_id, "icon", default_icon),
    )
}

/// Base a generated view on the user's config for the same path, then set
/// the generated fields. The `strategy` key is dropped — generation is a
/// single pass here, there is no second per-view phase to hand off to.
fn view_object(config: &DashboardConfig, meta: &ViewMeta, cards: Vec<Value>) -> JsonObject {
    let mut view = config
        .view_config(&meta.path)
        .cloned()
        .unwrap_or_default();
    view.remove("strategy");
    view.insert("title".to_string(), Value::String(meta.title.clone()));
    view.insert("icon".to_string(), Value::String(meta.icon.clone()));
    view.insert("path".to_string(), Value::String(meta.path.clone()));
    view.insert("cards".to_string(), Value::Array(cards));
    view
}

fn resolved_group_schema(
    config: &DashboardConfig,
    path: &str,
) -> StrategyResult<IndexMap<String, GroupDefinition>> {
    let fallback = serde_json::to_value(default_group_schema())
        .map_err(|source| invalid_option("group_schema", source))?;
    let merged =
        resolve_option(config, path, "group_schema", ConfigValue::from_value(fallback)).into_value();
    serde_json::from_value(merged).map_err(|source| invalid_option("group_schema", source))
}

/// Per-view discovery rules are prepended to the built-in schema, so user
/// rules win under first-match semantics.
fn resolved_discovery_schema(
    config: &DashboardConfig,
    path: &str,
) -> StrategyResult<Vec<DiscoveryRule>> {
    let custom = resolve_option(config, path, "discovery", ConfigValue::List(Vec::new()))
        .into_value();
    let mut rules: Vec<DiscoveryRule> =
        serde_json::from_value(custom).map_err(|source| invalid_option("discovery", source))?;
    rules.extend(default_discovery_schema());
    Ok(rules)
}

fn invalid_option(key: &str, source: serde_json::Error) -> StrategyError {
    StrategyError::InvalidOption {
        key: key.to_string(),
        source,
    }
}
