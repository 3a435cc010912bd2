//! Error types for the drought-alerts crate.

use thiserror::Error;

/// Errors that can occur while building or decoding triggers.
///
/// Per-condition evaluation problems (missing indicator, null value) are not
/// errors in this sense: they are captured as diagnostic strings on the
/// relevant [`ConditionResult`](crate::types::ConditionResult) so that the
/// remaining conditions keep evaluating.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Invalid trigger configuration.
    #[error("invalid trigger: {reason}")]
    InvalidTrigger {
        /// The reason the trigger is invalid.
        reason: String,
    },

    /// An operator symbol read from storage is not one of the five
    /// recognized operators.
    #[error("invalid operator: {symbol}")]
    InvalidOperator {
        /// The unrecognized symbol.
        symbol: String,
    },

    /// An indicator key read from storage is not part of the closed
    /// indicator set.
    #[error("invalid indicator: {key}")]
    InvalidIndicator {
        /// The unrecognized key.
        key: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TriggerError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for trigger operations.
pub type Result<T> = std::result::Result<T, TriggerError>;
