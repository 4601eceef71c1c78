//! Dashboard configuration and option resolution
//!
//! Options are resolved by merging two scopes over a fallback: the global
//! strategy configuration, then the view's own configuration. Lists
//! concatenate and deduplicate, maps shallow-merge, scalars override, so
//! operators can set defaults once and extend narrowly per area.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use av_core::JsonObject;

/// Top-level dashboard configuration, owned by the host.
///
/// Views stay opaque maps; the engine only reads the handful of keys it
/// resolves and returns an augmented copy with generated views injected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Global strategy options
    #[serde(default, skip_serializing_if = "JsonObject::is_empty")]
    pub strategy: JsonObject,

    /// View configurations, keyed by their `path` entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<JsonObject>,

    /// Everything else in the dashboard config, carried through untouched
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl DashboardConfig {
    /// The view configuration for a path, if the host supplied one
    pub fn view_config(&self, path: &str) -> Option<&JsonObject> {
        self.views
            .iter()
            .find(|view| view.get("path").and_then(Value::as_str) == Some(path))
    }
}

/// Two configuration values whose shapes cannot be merged.
#[derive(Debug, Clone, Error)]
#[error("cannot merge a {incoming} into a {accumulator}")]
pub struct MergeError {
    accumulator: &'static str,
    incoming: &'static str,
}

/// A configuration value in one of the three shapes the merge rules
/// distinguish.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    List(Vec<Value>),
    Map(JsonObject),
    Scalar(Value),
}

impl ConfigValue {
    /// Classify a raw JSON value
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => ConfigValue::List(items),
            Value::Object(map) => ConfigValue::Map(map),
            scalar => ConfigValue::Scalar(scalar),
        }
    }

    /// Back to raw JSON
    pub fn into_value(self) -> Value {
        match self {
            ConfigValue::List(items) => Value::Array(items),
            ConfigValue::Map(map) => Value::Object(map),
            ConfigValue::Scalar(value) => value,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
            ConfigValue::Scalar(_) => "scalar",
        }
    }

    /// Merge `incoming` into `self`.
    ///
    /// - incoming list: replaces an empty list accumulator, otherwise
    ///   concatenates with set-union semantics (first-seen order kept);
    ///   a non-list accumulator cannot take a list.
    /// - incoming map: shallow-merges into a map accumulator (incoming
    ///   keys win) and replaces a scalar accumulator; a list accumulator
    ///   cannot take a map.
    /// - incoming scalar: replaces the accumulator outright.
    pub fn merge(self, incoming: ConfigValue) -> Result<ConfigValue, MergeError> {
        match (self, incoming) {
            (ConfigValue::List(accumulator), ConfigValue::List(items)) => {
                if accumulator.is_empty() {
                    return Ok(ConfigValue::List(items));
                }
                let mut merged = accumulator;
                for item in items {
                    if !merged.contains(&item) {
                        merged.push(item);
                    }
                }
                Ok(ConfigValue::List(merged))
            }
            (ConfigValue::Map(mut accumulator), ConfigValue::Map(entries)) => {
                for (key, value) in entries {
                    accumulator.insert(key, value);
                }
                Ok(ConfigValue::Map(accumulator))
            }
            (ConfigValue::Scalar(_), ConfigValue::Map(entries)) => Ok(ConfigValue::Map(entries)),
            (_, ConfigValue::Scalar(value)) => Ok(ConfigValue::Scalar(value)),
            (accumulator, incoming) => Err(MergeError {
                accumulator: accumulator.kind(),
                incoming: incoming.kind(),
            }),
        }
    }
}

/// Resolve one option for a view.
///
/// Merges `[global scope, view scope]` left to right over `fallback`.
/// `null` values count as absent. A value that cannot be merged is logged
/// and skipped — the accumulator keeps its prior value, so one malformed
/// option never aborts dashboard generation.
pub fn resolve_option(
    config: &DashboardConfig,
    view_path: &str,
    key: &str,
    fallback: ConfigValue,
) -> ConfigValue {
    let view = config.view_config(view_path);
    let scopes = [
        config.strategy.get(key),
        view.and_then(|view| view.get(key)),
    ];

    let mut result = fallback;
    for value in scopes.into_iter().flatten() {
        if value.is_null() {
            continue;
        }
        match result.clone().merge(ConfigValue::from_value(value.clone())) {
            Ok(merged) => result = merged,
            Err(err) => warn!(key, view_path, %err, "skipping malformed configuration value"),
        }
    }
    result
}

/// Resolve a string option
pub fn resolve_string(
    config: &DashboardConfig,
    view_path: &str,
    key: &str,
    fallback: &str,
) -> String {
    match resolve_option(
        config,
        view_path,
        key,
        ConfigValue::Scalar(Value::String(fallback.to_string())),
    )
    .into_value()
    {
        Value::String(value) => value,
        _ => fallback.to_string(),
    }
}

/// Resolve a string option with no built-in default
pub fn resolve_optional_string(
    config: &DashboardConfig,
    view_path: &str,
    key: &str,
) -> Option<String> {
    match resolve_option(config, view_path, key, ConfigValue::Scalar(Value::Null)).into_value() {
        Value::String(value) => Some(value),
        _ => None,
    }
}

/// Resolve a boolean option
pub fn resolve_bool(config: &DashboardConfig, view_path: &str, key: &str, fallback: bool) -> bool {
    resolve_option(
        config,
        view_path,
        key,
        ConfigValue::Scalar(Value::Bool(fallback)),
    )
    .into_value()
    .as_bool()
    .unwrap_or(fallback)
}

/// Resolve a list option; non-list results collapse to the fallback
pub fn resolve_list(
    config: &DashboardConfig,
    view_path: &str,
    key: &str,
    fallback: Vec<Value>,
) -> Vec<Value> {
    match resolve_option(config, view_path, key, ConfigValue::List(fallback.clone())) {
        ConfigValue::List(items) => items,
        _ => fallback,
    }
}

/// Resolve a list option into its string members
pub fn resolve_strings(
    config: &DashboardConfig,
    view_path: &str,
    key: &str,
    fallback: Vec<String>,
) -> Vec<String> {
    resolve_list(
        config,
        view_path,
        key,
        fallback.into_iter().map(Value::String).collect(),
    )
    .into_iter()
    .filter_map(|value| match value {
        Value::String(entry) => Some(entry),
        _ => None,
    })
    .collect()
}
