//! Area views dashboard strategy
//!
//! Generates a dashboard layout — one view per area plus a home overview —
//! from the host's area and entity registries, driven by a declarative
//! discovery schema instead of hand-authored card lists. The engine only
//! computes which card descriptors should exist and in what order; the
//! host's renderer interprets them.
//!
//! Entry point is [`AreaViewsStrategy::generate_dashboard`], which takes
//! the host API, the dashboard configuration and a locale, and returns the
//! configuration with its views replaced by generated ones.

mod classify;
mod client;
mod collect;
mod config;
mod dashboard;
mod diagnostics;
mod error;
mod home;
mod layout;

pub use classify::classify;
pub use client::{ApiError, ApiResult, HomeApi, RelatedEntities};
pub use collect::collect_area_entities;
pub use config::{
    resolve_bool, resolve_list, resolve_option, resolve_optional_string, resolve_string,
    resolve_strings, ConfigValue, DashboardConfig, MergeError,
};
pub use dashboard::{AreaViewsStrategy, DEFAULT_VIEW_PATH};
pub use diagnostics::{Diagnostics, SkipReason, SkippedEntity};
pub use error::{StrategyError, StrategyResult};
pub use home::{build_home_view, AreaViewContext};
pub use layout::{build_area_view, header_card, ViewMeta, HEADER_CARD_TYPE};
