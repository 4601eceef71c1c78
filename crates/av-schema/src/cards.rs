//! Built-in card templates
//!
//! Templates are plain JSON objects; the layout builder merges an entity's
//! name and identifier into a template to produce a card. Nothing here is
//! validated against the renderer's card schema.

use serde_json::{json, Value};

use av_core::JsonObject;

/// An opaque card descriptor before entity identity is merged in.
pub type CardTemplate = JsonObject;

fn template(value: Value) -> CardTemplate {
    match value {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

/// Button card for toggleable entities.
///
/// The card-mod style payload fixes the stock button card's label padding;
/// a frontend without card-mod installed ignores it.
pub fn button_card() -> CardTemplate {
    template(json!({
        "type": "button",
        "show_state": true,
        "card_mod": {
            "style": "span { padding-left: 5px; padding-right: 5px; font-size: 14px; font-weight: 400;}; .state {font-size: 10px; font-weight: 100; color: var(--secondary-text-color);}"
        }
    }))
}

/// Row inside an entities card; plain rows carry no `type` key.
pub fn entity_row() -> CardTemplate {
    template(json!({
        "secondary_info": "last-updated"
    }))
}

/// Camera preview card
pub fn picture_entity_card() -> CardTemplate {
    template(json!({
        "type": "picture-entity",
        "show_state": false
    }))
}

/// Media player card
pub fn media_control_card() -> CardTemplate {
    template(json!({
        "type": "media-control"
    }))
}

/// Alarm panel card
pub fn alarm_panel_card() -> CardTemplate {
    template(json!({
        "type": "alarm-panel"
    }))
}

/// Grid container with the given column count
pub fn grid_card(columns: u64) -> CardTemplate {
    template(json!({
        "type": "grid",
        "columns": columns
    }))
}

/// Entities container; children land in its `entities` field
pub fn entities_card() -> CardTemplate {
    template(json!({
        "type": "entities",
        "show_header_toggle": false
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_row_has_no_type() {
        assert!(!entity_row().contains_key("type"));
    }

    #[test]
    fn test_grid_columns() {
        let grid = grid_card(3);
        assert_eq!(grid.get("type").and_then(Value::as_str), Some("grid"));
        assert_eq!(grid.get("columns").and_then(Value::as_u64), Some(3));
    }
}
