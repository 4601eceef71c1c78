//! Built-in schema data for the area views strategy
//!
//! The declarative half of the dashboard engine: which card an entity
//! becomes (discovery schema), how cards are grouped and ordered (group
//! schema), the card templates themselves, and the string table for
//! localized group titles. All of it can be overridden per view through
//! the configuration resolver; this crate only supplies the defaults.

mod cards;
mod discovery;
mod groups;
mod strings;

pub use cards::{
    alarm_panel_card, button_card, entities_card, entity_row, grid_card, media_control_card,
    picture_entity_card, CardTemplate,
};
pub use discovery::{default_discovery_schema, default_exclude, DiscoveryRule};
pub use groups::{
    default_group_schema, FooterDefinition, GroupDefinition, GROUP_ALARM, GROUP_AUTOMATIONS,
    GROUP_CAMERAS, GROUP_CLIMATE, GROUP_MEDIA_PLAYERS, GROUP_SCENES, GROUP_SENSORS,
    GROUP_TOP_BUTTONS,
};
pub use strings::{localize, DEFAULT_LOCALE};
