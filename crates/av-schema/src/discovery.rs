//! Discovery schema
//!
//! The ordered rule table that turns entities into (card template, group)
//! pairs. Discovery happens top down and stops at the first match, so rule
//! order is load-bearing: the specific climate rules come before the
//! generic button rules, and the table ends with a catch-all that routes
//! everything else onto the sensors card.

use serde::{Deserialize, Serialize};

use av_core::EntityMatch;

use crate::cards::{
    alarm_panel_card, button_card, entity_row, media_control_card, picture_entity_card,
    CardTemplate,
};
use crate::groups::{
    GROUP_ALARM, GROUP_AUTOMATIONS, GROUP_CAMERAS, GROUP_CLIMATE, GROUP_MEDIA_PLAYERS,
    GROUP_SCENES, GROUP_SENSORS, GROUP_TOP_BUTTONS,
};

/// One rule of the discovery schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryRule {
    /// Match constraints, flattened so rules read
    /// `{"domain": ..., "card": ..., "group": ...}` in configuration
    #[serde(flatten)]
    pub matcher: EntityMatch,

    /// Card template for matched entities
    pub card: CardTemplate,

    /// Target group id
    pub group: String,
}

impl DiscoveryRule {
    fn new(matcher: EntityMatch, card: CardTemplate, group: &str) -> Self {
        Self {
            matcher,
            card,
            group: group.to_string(),
        }
    }
}

/// The built-in discovery schema.
pub fn default_discovery_schema() -> Vec<DiscoveryRule> {
    vec![
        DiscoveryRule::new(EntityMatch::domain("climate"), entity_row(), GROUP_CLIMATE),
        DiscoveryRule::new(
            EntityMatch::domain("sensor").with_device_class("temperature"),
            entity_row(),
            GROUP_CLIMATE,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("sensor").with_device_class("humidity"),
            entity_row(),
            GROUP_CLIMATE,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("humidifier"),
            entity_row(),
            GROUP_CLIMATE,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("dehumidifier"),
            entity_row(),
            GROUP_CLIMATE,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("switch").with_entity_id("*humidifier*"),
            entity_row(),
            GROUP_CLIMATE,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("sensor").with_entity_id("*humidifier*"),
            entity_row(),
            GROUP_CLIMATE,
        ),
        DiscoveryRule::new(EntityMatch::domain("light"), button_card(), GROUP_TOP_BUTTONS),
        DiscoveryRule::new(
            EntityMatch::domain("switch"),
            button_card(),
            GROUP_TOP_BUTTONS,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("input_boolean"),
            button_card(),
            GROUP_TOP_BUTTONS,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("button"),
            button_card(),
            GROUP_TOP_BUTTONS,
        ),
        DiscoveryRule::new(EntityMatch::domain("fan"), button_card(), GROUP_TOP_BUTTONS),
        DiscoveryRule::new(
            EntityMatch::domain("cover"),
            button_card(),
            GROUP_TOP_BUTTONS,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("camera"),
            picture_entity_card(),
            GROUP_CAMERAS,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("media_player"),
            media_control_card(),
            GROUP_MEDIA_PLAYERS,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("automation"),
            entity_row(),
            GROUP_AUTOMATIONS,
        ),
        DiscoveryRule::new(
            EntityMatch::domain("script"),
            entity_row(),
            GROUP_AUTOMATIONS,
        ),
        DiscoveryRule::new(EntityMatch::domain("scene"), entity_row(), GROUP_SCENES),
        DiscoveryRule::new(
            EntityMatch::domain("alarm_control_panel"),
            alarm_panel_card(),
            GROUP_ALARM,
        ),
        DiscoveryRule::new(EntityMatch::catch_all(), entity_row(), GROUP_SENSORS),
    ]
}

/// Entities excluded from every area unless configuration says otherwise.
pub fn default_exclude() -> Vec<String> {
    ["update", "device_tracker", "persistent_notification", "tts"]
        .into_iter()
        .map(String::from)
        .collect()
}
