//! Strategy errors
//!
//! Only fatal conditions surface here; recoverable ones (missing states,
//! unnamed entities, malformed option values) are logged and recorded in
//! the diagnostics collector instead.

use thiserror::Error;

use crate::client::ApiError;

/// Errors that abort a view's generation
#[derive(Debug, Error)]
pub enum StrategyError {
    /// No discovery rule matched an entity. The schema must end with a
    /// catch-all rule, so this is a configuration defect, not a runtime
    /// condition to route around.
    #[error("no discovery rule matched entity {0}; the discovery schema must end with a catch-all rule")]
    ClassificationMiss(String),

    /// A discovery rule routed entities to a group the group schema does
    /// not define.
    #[error("group schema has no definition for group {0}")]
    UnknownGroup(String),

    /// A resolved option did not deserialize into its expected shape.
    #[error("invalid {key} configuration")]
    InvalidOption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A registry or state query failed; queries are not retried.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for strategy operations
pub type StrategyResult<T> = Result<T, StrategyError>;
