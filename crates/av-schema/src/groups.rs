//! Group schema
//!
//! Groups bucket classified entities and decide where the bucket lands in
//! the assembled view. A group without a container card splices its
//! children directly into the layout; `index` controls placement order,
//! ties keep schema insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use av_core::{EntityMatch, EntityMatchList};

use crate::cards::{entities_card, grid_card, CardTemplate};

pub const GROUP_CAMERAS: &str = "cameras";
pub const GROUP_TOP_BUTTONS: &str = "topbuttons";
pub const GROUP_ALARM: &str = "alarm";
pub const GROUP_MEDIA_PLAYERS: &str = "media";
pub const GROUP_CLIMATE: &str = "climate";
pub const GROUP_SCENES: &str = "scenes";
pub const GROUP_SENSORS: &str = "sensors";
pub const GROUP_AUTOMATIONS: &str = "automations";

/// Footer attached to a group's container card.
///
/// The `entity` rules are resolved against the area's full entity list at
/// layout time; the remaining fields are copied verbatim into the footer
/// with `entity` rewritten to the matched identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterDefinition {
    /// Match rules tried in order to pick the footer entity
    pub entity: EntityMatchList,

    /// Remaining footer fields (type, hours_to_show, ...)
    #[serde(flatten)]
    pub card: CardTemplate,
}

/// One group of the group schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDefinition {
    /// Placement order in the assembled view
    pub index: i64,

    /// Container card wrapping the group's children; absent means the
    /// children are spliced directly into the view at `index`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardTemplate>,

    /// Localizable container title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterDefinition>,
}

impl GroupDefinition {
    /// A group that splices its children directly into the view
    pub fn spliced(index: i64) -> Self {
        Self {
            index,
            card: None,
            title: None,
            footer: None,
        }
    }

    /// A group wrapping its children in the given container card
    pub fn wrapped(index: i64, card: CardTemplate) -> Self {
        Self {
            index,
            card: Some(card),
            title: None,
            footer: None,
        }
    }

    /// Set the localizable title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the footer
    pub fn with_footer(mut self, footer: FooterDefinition) -> Self {
        self.footer = Some(footer);
        self
    }
}

/// The built-in group schema.
///
/// Cameras come first as bare cards, then the button grid, then the
/// entities-card groups. Indexes start at 1; the view header is pinned at
/// index 0 by the layout builder.
pub fn default_group_schema() -> IndexMap<String, GroupDefinition> {
    IndexMap::from([
        (GROUP_CAMERAS.to_string(), GroupDefinition::spliced(1)),
        (
            GROUP_TOP_BUTTONS.to_string(),
            GroupDefinition::wrapped(2, grid_card(3)),
        ),
        (GROUP_ALARM.to_string(), GroupDefinition::spliced(3)),
        (GROUP_MEDIA_PLAYERS.to_string(), GroupDefinition::spliced(4)),
        (
            GROUP_CLIMATE.to_string(),
            GroupDefinition::wrapped(5, entities_card())
                .with_title("Climate")
                .with_footer(FooterDefinition {
                    entity: EntityMatchList::from(vec![
                        EntityMatch::domain("sensor").with_device_class("temperature"),
                        EntityMatch::domain("sensor").with_device_class("humidity"),
                    ]),
                    card: CardTemplate::from_iter([
                        ("type".to_string(), "graph".into()),
                        ("hours_to_show".to_string(), 24.into()),
                    ]),
                }),
        ),
        (
            GROUP_SCENES.to_string(),
            GroupDefinition::wrapped(6, entities_card()).with_title("Scenes"),
        ),
        (
            GROUP_SENSORS.to_string(),
            GroupDefinition::wrapped(7, entities_card()).with_title("Sensors"),
        ),
        (
            GROUP_AUTOMATIONS.to_string(),
            GroupDefinition::wrapped(8, entities_card()).with_title("Automations"),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexes_are_unique_and_ordered() {
        let schema = default_group_schema();
        let indexes: Vec<i64> = schema.values().map(|group| group.index).collect();
        let mut sorted = indexes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(indexes, sorted);
        assert!(indexes.iter().all(|index| *index >= 1));
    }

    #[test]
    fn test_climate_footer_rules() {
        let schema = default_group_schema();
        let climate = &schema[GROUP_CLIMATE];
        let footer = climate.footer.as_ref().unwrap();
        assert!(matches!(&footer.entity, EntityMatchList::Many(rules) if rules.len() == 2));
        assert_eq!(
            footer.card.get("type").and_then(serde_json::Value::as_str),
            Some("graph")
        );
    }

    #[test]
    fn test_schema_roundtrips_through_json() {
        let schema = default_group_schema();
        let value = serde_json::to_value(&schema).unwrap();
        let back: IndexMap<String, GroupDefinition> = serde_json::from_value(value).unwrap();
        assert_eq!(schema, back);
    }
}
