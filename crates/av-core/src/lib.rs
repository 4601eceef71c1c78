//! Core types for the area views dashboard strategy
//!
//! This crate provides the value types the strategy engine works on —
//! areas, registry entries, live states, collected entities — and the
//! string/rule matching primitives used throughout.

pub mod matcher;

mod area;
mod collate;
mod device_class;
mod entity;
mod registry;
mod rules;
mod state;

pub use area::AreaEntry;
pub use collate::compare_names;
pub use device_class::DeviceClass;
pub use entity::{domain_of, AreaEntity};
pub use registry::{DisabledBy, EntityCategory, EntityEntry};
pub use rules::{EntityMatch, EntityMatchList};
pub use state::EntityState;

/// Opaque key-value descriptor, the shape of cards and view configs.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
