//! Error types for the drought-engine crate.

use thiserror::Error;

/// Errors that can occur during orchestration.
///
/// Per-trigger problems are never errors at this level: they are reported on
/// the individual evaluation entries. Only total inability to fetch a user's
/// triggers fails the batch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The trigger store could not serve the read; the batch cannot proceed
    /// without triggers.
    #[error("trigger store unavailable: {reason}")]
    StoreUnavailable {
        /// The reason the store read failed.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
