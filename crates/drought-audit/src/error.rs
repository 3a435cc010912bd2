//! Error types for the drought-audit crate.

use thiserror::Error;

/// Errors that can occur while reading or appending the notification log.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The log backend could not serve a read.
    #[error("notification log read failed: {reason}")]
    ReadFailed {
        /// The reason the read failed.
        reason: String,
    },

    /// The log backend could not persist an event.
    #[error("notification log write failed: {reason}")]
    WriteFailed {
        /// The reason the write failed.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_read_failed() {
        let err = AuditError::ReadFailed {
            reason: "store unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "notification log read failed: store unavailable"
        );
    }

    #[test]
    fn error_display_write_failed() {
        let err = AuditError::WriteFailed {
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "notification log write failed: disk full");
    }

    #[test]
    fn error_from_serde_json() {
        let json_err = serde_json::from_str::<String>("not json");
        assert!(json_err.is_err());
        let audit_err: AuditError = json_err.unwrap_err().into();
        assert!(matches!(audit_err, AuditError::SerializationError(_)));
    }
}
