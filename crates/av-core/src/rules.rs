//! Entity match rules
//!
//! A rule matches an entity when every present field matches; absent
//! fields are wildcards. `domain` and `device_class` compare exactly, the
//! `entity_id` field goes through the pattern matcher and may be a glob or
//! `/regex/`.

use serde::{Deserialize, Serialize};

use crate::{matcher, AreaEntity};

/// Match constraints against a collected entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,

    /// Literal, glob or `/regex/` pattern for the entity identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl EntityMatch {
    /// A rule with no constraints, matching every entity
    pub fn catch_all() -> Self {
        Self::default()
    }

    /// Constrain by domain
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    /// Add a device class constraint
    pub fn with_device_class(mut self, class: impl Into<String>) -> Self {
        self.device_class = Some(class.into());
        self
    }

    /// Add an entity identifier pattern
    pub fn with_entity_id(mut self, pattern: impl Into<String>) -> Self {
        self.entity_id = Some(pattern.into());
        self
    }

    /// Whether this rule has no constraints at all
    pub fn is_catch_all(&self) -> bool {
        self.domain.is_none() && self.device_class.is_none() && self.entity_id.is_none()
    }

    /// Test the rule against one entity; all present fields must match.
    pub fn matches(&self, entity: &AreaEntity) -> bool {
        if let Some(domain) = &self.domain {
            if domain != &entity.domain {
                return false;
            }
        }
        if let Some(class) = &self.device_class {
            match &entity.device_class {
                Some(entity_class) if entity_class.as_str() == class => {}
                _ => return false,
            }
        }
        if let Some(pattern) = &self.entity_id {
            if !matcher::matches(pattern, &entity.entity_id) {
                return false;
            }
        }
        true
    }
}

/// One rule or an ordered list of rules, as accepted by footer lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityMatchList {
    Many(Vec<EntityMatch>),
    One(EntityMatch),
}

impl EntityMatchList {
    /// Find the first entity any rule matches.
    ///
    /// Rules are tried in order and each rule scans the whole entity list,
    /// so an earlier rule wins over an earlier entity.
    pub fn find_first<'a>(&self, entities: &'a [AreaEntity]) -> Option<&'a AreaEntity> {
        match self {
            EntityMatchList::One(rule) => entities.iter().find(|entity| rule.matches(entity)),
            EntityMatchList::Many(rules) => rules
                .iter()
                .find_map(|rule| entities.iter().find(|entity| rule.matches(entity))),
        }
    }
}

impl From<EntityMatch> for EntityMatchList {
    fn from(rule: EntityMatch) -> Self {
        EntityMatchList::One(rule)
    }
}

impl From<Vec<EntityMatch>> for EntityMatchList {
    fn from(rules: Vec<EntityMatch>) -> Self {
        EntityMatchList::Many(rules)
    }
}
