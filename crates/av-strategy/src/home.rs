//! Home overview layout
//!
//! The home view shows every area, either as a compact grid of navigation
//! buttons or as full-size area summary cards. Extra cards here are
//! LIST-INSERTED at their declared position — deliberately different from
//! the index sort used by area views.

use indexmap::IndexMap;
use serde_json::{json, Value};

use av_core::{compare_names, AreaEntity, DeviceClass, JsonObject};
use av_schema::{button_card, grid_card, GroupDefinition, GROUP_TOP_BUTTONS};

use crate::layout::ViewMeta;

/// Position extra cards land at when they declare no index
const EXTRA_CARD_POSITION: usize = 99;

/// One generated area view with everything the home view needs from it.
#[derive(Debug, Clone)]
pub struct AreaViewContext {
    pub meta: ViewMeta,
    pub entities: Vec<AreaEntity>,
    /// Configured entity for the area's navigation button, overriding the
    /// motion/door/window discovery fallback
    pub motion_entity: Option<String>,
}

/// Build the ordered card list of the home view.
///
/// `areas` is expected in final view order; normal mode emits one area
/// card per view in that order, compact mode re-sorts the buttons by name.
pub fn build_home_view(
    header: JsonObject,
    areas: &[AreaViewContext],
    groups: &IndexMap<String, GroupDefinition>,
    compact: bool,
    extra_cards: &[Value],
) -> Vec<Value> {
    let mut cards: Vec<Value> = vec![Value::Object(header)];

    if compact {
        let mut buttons: Vec<JsonObject> = areas.iter().map(navigation_button).collect();
        buttons.sort_by(|a, b| {
            compare_names(
                a.get("name").and_then(Value::as_str).unwrap_or_default(),
                b.get("name").and_then(Value::as_str).unwrap_or_default(),
            )
        });

        let mut grid = groups
            .get(GROUP_TOP_BUTTONS)
            .and_then(|group| group.card.clone())
            .unwrap_or_else(|| grid_card(3));
        grid.insert(
            "cards".to_string(),
            Value::Array(buttons.into_iter().map(Value::Object).collect()),
        );
        cards.push(Value::Object(grid));
    } else {
        for area in areas {
            cards.push(json!({
                "type": "area",
                "area": area.meta.path,
                "show_camera": true,
                "navigation_path": area.meta.path,
            }));
        }
    }

    // list insertion, clamped to the current length
    for extra in extra_cards {
        let position = extra
            .get("index")
            .and_then(Value::as_u64)
            .unwrap_or(EXTRA_CARD_POSITION as u64) as usize;
        cards.insert(position.min(cards.len()), extra.clone());
    }

    cards
}

/// Build one area's navigation button.
///
/// The button's entity is the configured override, else the area's first
/// motion sensor, else its first door or window sensor, else none.
fn navigation_button(area: &AreaViewContext) -> JsonObject {
    let entity = area
        .motion_entity
        .clone()
        .or_else(|| pick_status_entity(&area.entities));

    let mut button = button_card();
    if let Some(entity_id) = entity {
        button.insert("entity".to_string(), Value::String(entity_id));
    }
    button.insert("name".to_string(), Value::String(area.meta.title.clone()));
    button.insert("show_state".to_string(), Value::Bool(false));
    button.insert("icon".to_string(), Value::String(area.meta.icon.clone()));
    button.insert(
        "tap_action".to_string(),
        json!({
            "action": "navigate",
            "navigation_path": area.meta.path,
        }),
    );
    button
}

fn pick_status_entity(entities: &[AreaEntity]) -> Option<String> {
    entities
        .iter()
        .find(|entity| entity.device_class == Some(DeviceClass::Motion))
        .or_else(|| {
            entities.iter().find(|entity| {
                matches!(
                    entity.device_class,
                    Some(DeviceClass::Door | DeviceClass::Window)
                )
            })
        })
        .map(|entity| entity.entity_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_schema::default_group_schema;

    fn area(path: &str, title: &str, entities: Vec<AreaEntity>) -> AreaViewContext {
        AreaViewContext {
            meta: ViewMeta::new(path, title, "mdi:sofa"),
            entities,
            motion_entity: None,
        }
    }

    fn header() -> JsonObject {
        let mut card = JsonObject::new();
        card.insert("type".to_string(), "custom:area-header".into());
        card
    }

    #[test]
    fn test_normal_mode_emits_area_cards_in_order() {
        let areas = vec![area("bedroom", "Bedroom", vec![]), area("kitchen", "Kitchen", vec![])];
        let cards = build_home_view(header(), &areas, &default_group_schema(), false, &[]);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].get("type").and_then(Value::as_str), Some("area"));
        assert_eq!(cards[1].get("area").and_then(Value::as_str), Some("bedroom"));
        assert_eq!(cards[2].get("area").and_then(Value::as_str), Some("kitchen"));
    }

    #[test]
    fn test_compact_mode_builds_one_grid() {
        let areas = vec![
            area(
                "kitchen",
                "Kitchen",
                vec![AreaEntity::new("binary_sensor.kitchen_motion", "Motion")
                    .with_device_class("motion")],
            ),
            area("bedroom", "Bedroom", vec![]),
        ];
        let cards = build_home_view(header(), &areas, &default_group_schema(), true, &[]);
        assert_eq!(cards.len(), 2);

        let grid = &cards[1];
        assert_eq!(grid.get("type").and_then(Value::as_str), Some("grid"));
        let buttons = grid.get("cards").and_then(Value::as_array).unwrap();
        assert_eq!(buttons.len(), 2);

        // buttons are name-sorted: Bedroom before Kitchen
        assert_eq!(
            buttons[0].get("name").and_then(Value::as_str),
            Some("Bedroom")
        );
        assert!(buttons[0].get("entity").is_none());
        assert_eq!(
            buttons[1].get("entity").and_then(Value::as_str),
            Some("binary_sensor.kitchen_motion")
        );
        assert_eq!(
            buttons[1]
                .get("tap_action")
                .and_then(|action| action.get("navigation_path"))
                .and_then(Value::as_str),
            Some("kitchen")
        );
        assert_eq!(buttons[1].get("show_state"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_button_entity_fallback_chain() {
        let entities = vec![
            AreaEntity::new("sensor.hall_temp", "Temperature").with_device_class("temperature"),
            AreaEntity::new("binary_sensor.hall_door", "Door").with_device_class("door"),
            AreaEntity::new("binary_sensor.hall_motion", "Motion").with_device_class("motion"),
        ];
        assert_eq!(
            pick_status_entity(&entities).as_deref(),
            Some("binary_sensor.hall_motion")
        );

        let no_motion = &entities[..2];
        assert_eq!(
            pick_status_entity(no_motion).as_deref(),
            Some("binary_sensor.hall_door")
        );

        assert_eq!(pick_status_entity(&entities[..1]), None);
    }

    #[test]
    fn test_motion_entity_override_wins() {
        let mut context = area(
            "kitchen",
            "Kitchen",
            vec![AreaEntity::new("binary_sensor.kitchen_motion", "Motion")
                .with_device_class("motion")],
        );
        context.motion_entity = Some("binary_sensor.kitchen_presence".to_string());
        let button = navigation_button(&context);
        assert_eq!(
            button.get("entity").and_then(Value::as_str),
            Some("binary_sensor.kitchen_presence")
        );
    }

    #[test]
    fn test_extra_cards_are_list_inserted() {
        let areas = vec![area("bedroom", "Bedroom", vec![]), area("kitchen", "Kitchen", vec![])];
        let extras = vec![
            json!({"type": "markdown", "content": "first", "index": 0}),
            json!({"type": "markdown", "content": "appended"}),
        ];
        let cards = build_home_view(header(), &areas, &default_group_schema(), false, &extras);
        // index 0 inserts before the header; the default lands at the end
        assert_eq!(cards[0].get("content").and_then(Value::as_str), Some("first"));
        assert_eq!(
            cards.last().unwrap().get("content").and_then(Value::as_str),
            Some("appended")
        );
    }
}
