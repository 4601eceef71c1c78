//! Area view layout
//!
//! Turns one area's collected entities into the ordered card list of its
//! view: classify every entity, bucket by group, sort each bucket by
//! display name, then splice, promote or wrap buckets according to the
//! group schema and sort the whole view by group index. The sort is
//! stable, so equal indexes keep insertion order.

use indexmap::IndexMap;
use serde_json::{json, Value};

use av_core::{compare_names, AreaEntity, JsonObject};
use av_schema::{localize, DiscoveryRule, GroupDefinition};

use crate::classify::classify;
use crate::error::{StrategyError, StrategyResult};

/// Card type of the view selector header
pub const HEADER_CARD_TYPE: &str = "custom:area-header";

/// Index the header card is tagged with. Group indexes in the built-in
/// schema start at 1 and the final sort is stable, so the header always
/// lands first.
pub const HEADER_INDEX: i64 = 0;

/// Index assigned to extra cards that do not declare one
const EXTRA_CARD_INDEX: i64 = 99;

/// Name, icon and path of one view, as shown by the selector header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewMeta {
    pub path: String,
    pub title: String,
    pub icon: String,
}

impl ViewMeta {
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            icon: icon.into(),
        }
    }
}

/// Build the view selector header card.
///
/// Lists every view of the dashboard so the header can render a dropdown,
/// and marks the view it sits on as current.
pub fn header_card(views: &[ViewMeta], current: &ViewMeta, disable_menu: bool) -> JsonObject {
    let options: Vec<Value> = views
        .iter()
        .map(|view| {
            json!({
                "name": view.title,
                "icon": view.icon,
                "path": view.path,
            })
        })
        .collect();
    let mut card = JsonObject::new();
    card.insert("type".to_string(), Value::String(HEADER_CARD_TYPE.to_string()));
    card.insert("options".to_string(), Value::Array(options));
    card.insert(
        "current".to_string(),
        json!({
            "name": current.title,
            "icon": current.icon,
            "path": current.path,
        }),
    );
    card.insert("disable_menu".to_string(), Value::Bool(disable_menu));
    card
}

/// Build the ordered card list of one area view.
///
/// Every entity must classify; a miss aborts the view. Extra cards are
/// appended as-is and participate in the final index sort, tagged with 99
/// when they declare no index of their own.
pub fn build_area_view(
    header: JsonObject,
    entities: &[AreaEntity],
    discovery: &[DiscoveryRule],
    groups: &IndexMap<String, GroupDefinition>,
    extra_cards: &[Value],
    locale: &str,
) -> StrategyResult<Vec<Value>> {
    let mut cards: Vec<Value> = vec![with_index(header, HEADER_INDEX)];

    // bucket classified entities by group, keeping first-seen group order
    let mut buckets: IndexMap<&str, Vec<JsonObject>> = IndexMap::new();
    for entity in entities {
        let rule = classify(entity, discovery)
            .ok_or_else(|| StrategyError::ClassificationMiss(entity.entity_id.clone()))?;
        let mut card = rule.card.clone();
        card.insert("name".to_string(), Value::String(entity.name.clone()));
        card.insert("entity".to_string(), Value::String(entity.entity_id.clone()));
        buckets.entry(rule.group.as_str()).or_default().push(card);
    }

    for (group_id, mut bucket) in buckets {
        bucket.sort_by(|a, b| compare_names(card_name(a), card_name(b)));

        let group = groups
            .get(group_id)
            .ok_or_else(|| StrategyError::UnknownGroup(group_id.to_string()))?;

        let Some(container) = &group.card else {
            // no container: splice the bucket directly into the view
            cards.extend(bucket.into_iter().map(|card| with_index(card, group.index)));
            continue;
        };

        if bucket.len() == 1 {
            // a one-child wrapper is pointless, promote the child
            if let Some(card) = bucket.pop() {
                cards.push(with_index(card, group.index));
            }
            continue;
        }

        let mut wrapped = container.clone();
        let children: Vec<Value> = bucket.into_iter().map(Value::Object).collect();
        let child_field = if wrapped.get("type").and_then(Value::as_str) == Some("entities") {
            "entities"
        } else {
            "cards"
        };
        wrapped.insert(child_field.to_string(), Value::Array(children));

        // footers resolve against the area's full entity list, not the bucket
        if let Some(footer) = &group.footer {
            if let Some(entity) = footer.entity.find_first(entities) {
                let mut resolved = footer.card.clone();
                resolved.insert(
                    "entity".to_string(),
                    Value::String(entity.entity_id.clone()),
                );
                wrapped.insert("footer".to_string(), Value::Object(resolved));
            }
        }

        if let Some(title) = &group.title {
            wrapped.insert("title".to_string(), Value::String(localize(locale, title)));
        }

        cards.push(with_index(wrapped, group.index));
    }

    for extra in extra_cards {
        cards.push(tag_extra(extra.clone()));
    }

    cards.sort_by_key(card_index);
    Ok(cards)
}

fn with_index(mut card: JsonObject, index: i64) -> Value {
    card.insert("index".to_string(), Value::from(index));
    Value::Object(card)
}

fn tag_extra(card: Value) -> Value {
    match card {
        Value::Object(mut map) => {
            map.entry("index".to_string())
                .or_insert_with(|| Value::from(EXTRA_CARD_INDEX));
            Value::Object(map)
        }
        other => other,
    }
}

fn card_index(card: &Value) -> i64 {
    card.get("index")
        .and_then(Value::as_i64)
        .unwrap_or(EXTRA_CARD_INDEX)
}

fn card_name(card: &JsonObject) -> &str {
    card.get("name").and_then(Value::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_schema::{default_discovery_schema, default_group_schema, DEFAULT_LOCALE, GROUP_CLIMATE};
    use serde_json::json;

    fn meta() -> ViewMeta {
        ViewMeta::new("kitchen", "Kitchen", "mdi:stove")
    }

    fn header() -> JsonObject {
        header_card(&[meta()], &meta(), false)
    }

    fn kitchen_entities() -> Vec<AreaEntity> {
        vec![
            AreaEntity::new("light.kitchen", "Ceiling Light"),
            AreaEntity::new("sensor.kitchen_temp", "Temperature")
                .with_device_class("temperature"),
        ]
    }

    #[test]
    fn test_header_sorts_first() {
        let cards = build_area_view(
            header(),
            &kitchen_entities(),
            &default_discovery_schema(),
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap();
        assert_eq!(
            cards[0].get("type").and_then(Value::as_str),
            Some(HEADER_CARD_TYPE)
        );
    }

    #[test]
    fn test_single_child_is_promoted() {
        // one light in the topbuttons group: the grid wrapper is skipped
        let cards = build_area_view(
            header(),
            &kitchen_entities(),
            &default_discovery_schema(),
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap();
        let button = cards
            .iter()
            .find(|card| card.get("entity").and_then(Value::as_str) == Some("light.kitchen"))
            .unwrap();
        assert_eq!(button.get("type").and_then(Value::as_str), Some("button"));
        assert_eq!(button.get("index").and_then(Value::as_i64), Some(2));
    }

    #[test]
    fn test_end_to_end_kitchen_order() {
        let cards = build_area_view(
            header(),
            &kitchen_entities(),
            &default_discovery_schema(),
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap();
        let types: Vec<Option<&str>> = cards
            .iter()
            .map(|card| card.get("type").and_then(Value::as_str))
            .collect();
        // header, then the promoted light button, then the climate row
        assert_eq!(types[0], Some(HEADER_CARD_TYPE));
        assert_eq!(types[1], Some("button"));
        assert_eq!(
            cards[2].get("entity").and_then(Value::as_str),
            Some("sensor.kitchen_temp")
        );
    }

    #[test]
    fn test_multi_entity_group_is_wrapped_with_footer_and_title() {
        let entities = vec![
            AreaEntity::new("sensor.kitchen_temp", "Temperature")
                .with_device_class("temperature"),
            AreaEntity::new("sensor.kitchen_humidity", "Humidity")
                .with_device_class("humidity"),
        ];
        let cards = build_area_view(
            header(),
            &entities,
            &default_discovery_schema(),
            &default_group_schema(),
            &[],
            "de",
        )
        .unwrap();
        let climate = &cards[1];
        assert_eq!(climate.get("type").and_then(Value::as_str), Some("entities"));
        assert_eq!(climate.get("title").and_then(Value::as_str), Some("Klima"));

        let rows = climate.get("entities").and_then(Value::as_array).unwrap();
        let names: Vec<&str> = rows
            .iter()
            .filter_map(|row| row.get("name").and_then(Value::as_str))
            .collect();
        assert_eq!(names, ["Humidity", "Temperature"]);

        let footer = climate.get("footer").unwrap();
        assert_eq!(
            footer.get("entity").and_then(Value::as_str),
            Some("sensor.kitchen_temp")
        );
        assert_eq!(footer.get("type").and_then(Value::as_str), Some("graph"));
        assert_eq!(footer.get("hours_to_show").and_then(Value::as_i64), Some(24));
    }

    #[test]
    fn test_unmatched_footer_is_omitted() {
        let entities = vec![
            AreaEntity::new("climate.kitchen", "Thermostat"),
            AreaEntity::new("humidifier.kitchen", "Humidifier"),
        ];
        let cards = build_area_view(
            header(),
            &entities,
            &default_discovery_schema(),
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap();
        let climate = &cards[1];
        assert_eq!(climate.get("type").and_then(Value::as_str), Some("entities"));
        assert!(climate.get("footer").is_none());
    }

    #[test]
    fn test_group_without_card_splices_children() {
        let entities = vec![
            AreaEntity::new("camera.kitchen_front", "Front"),
            AreaEntity::new("camera.kitchen_back", "Back"),
        ];
        let cards = build_area_view(
            header(),
            &entities,
            &default_discovery_schema(),
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap();
        // both picture cards land directly in the view, name-sorted
        assert_eq!(
            cards[1].get("entity").and_then(Value::as_str),
            Some("camera.kitchen_back")
        );
        assert_eq!(
            cards[2].get("entity").and_then(Value::as_str),
            Some("camera.kitchen_front")
        );
        assert_eq!(cards[1].get("index").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_unknown_group_is_fatal() {
        let schema: Vec<DiscoveryRule> = serde_json::from_value(json!([
            {"card": {}, "group": "nowhere"},
        ]))
        .unwrap();
        let err = build_area_view(
            header(),
            &kitchen_entities(),
            &schema,
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap_err();
        assert!(matches!(err, StrategyError::UnknownGroup(group) if group == "nowhere"));
    }

    #[test]
    fn test_classification_miss_is_fatal() {
        let schema: Vec<DiscoveryRule> = serde_json::from_value(json!([
            {"domain": "light", "card": {}, "group": GROUP_CLIMATE},
        ]))
        .unwrap();
        let entities = vec![AreaEntity::new("switch.kettle", "Kettle")];
        let err = build_area_view(
            header(),
            &entities,
            &schema,
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap_err();
        assert!(
            matches!(err, StrategyError::ClassificationMiss(entity) if entity == "switch.kettle")
        );
    }

    #[test]
    fn test_extra_cards_sort_by_index() {
        let extras = vec![
            json!({"type": "markdown", "content": "late"}),
            json!({"type": "markdown", "content": "early", "index": 1}),
        ];
        let cards = build_area_view(
            header(),
            &kitchen_entities(),
            &default_discovery_schema(),
            &default_group_schema(),
            &extras,
            DEFAULT_LOCALE,
        )
        .unwrap();
        let contents: Vec<Option<&str>> = cards
            .iter()
            .map(|card| card.get("content").and_then(Value::as_str))
            .collect();
        // the indexed extra slots in among the groups, the untagged one last
        assert_eq!(contents[1], Some("early"));
        assert_eq!(contents.last().copied().flatten(), Some("late"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let build = || {
            build_area_view(
                header(),
                &kitchen_entities(),
                &default_discovery_schema(),
                &default_group_schema(),
                &[json!({"type": "markdown", "content": "notes"})],
                DEFAULT_LOCALE,
            )
            .unwrap()
        };
        assert_eq!(
            serde_json::to_string(&build()).unwrap(),
            serde_json::to_string(&build()).unwrap()
        );
    }

    #[test]
    fn test_non_entities_container_uses_cards_field() {
        let entities = vec![
            AreaEntity::new("light.kitchen_left", "Left"),
            AreaEntity::new("light.kitchen_right", "Right"),
        ];
        let cards = build_area_view(
            header(),
            &entities,
            &default_discovery_schema(),
            &default_group_schema(),
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap();
        let grid = &cards[1];
        assert_eq!(grid.get("type").and_then(Value::as_str), Some("grid"));
        assert!(grid.get("cards").is_some());
        assert!(grid.get("entities").is_none());
    }

    #[test]
    fn test_tie_break_keeps_insertion_order() {
        let mut groups = default_group_schema();
        // scenes and sensors share an index; scenes is defined first
        if let Some(group) = groups.get_mut("sensors") {
            group.index = 6;
        }
        let entities = vec![
            AreaEntity::new("sensor.kitchen_power", "Power"),
            AreaEntity::new("sensor.kitchen_co2", "CO2"),
            AreaEntity::new("scene.kitchen_dinner", "Dinner"),
            AreaEntity::new("scene.kitchen_bright", "Bright"),
        ];
        let cards = build_area_view(
            header(),
            &entities,
            &default_discovery_schema(),
            &groups,
            &[],
            DEFAULT_LOCALE,
        )
        .unwrap();
        // sensors were bucketed first, so they come first at the tied index
        let titles: Vec<Option<&str>> = cards
            .iter()
            .map(|card| card.get("title").and_then(Value::as_str))
            .collect();
        assert_eq!(titles[1], Some("Sensors"));
        assert_eq!(titles[2], Some("Scenes"));
    }
}
