//! Error types for NutriSync.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every NutriSync crate.
///
/// Remote failures (`Validation`, `Network`, `Service`, `UnexpectedResponse`)
/// are recoverable by definition: the session controller turns them into
/// user-facing notices and never lets them escape an action.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NutriError {
    /// The plan service rejected the submitted input (`error` field in the body).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced a response (connect, DNS, TLS, reset...).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status and no `error` field.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The service answered, but the body did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },

    /// The durable session record exists but cannot be read back.
    #[error("Malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// A form field name that the input model does not know.
    #[error("Unknown form field: '{0}'")]
    UnknownField(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "base64", ...
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NutriError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an UnexpectedResponse error for the given endpoint
    pub fn unexpected_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a MalformedPersistedState error
    pub fn malformed_state(message: impl Into<String>) -> Self {
        Self::MalformedPersistedState(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a MalformedPersistedState error
    pub fn is_malformed_state(&self) -> bool {
        matches!(self, Self::MalformedPersistedState(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for NutriError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NutriError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for NutriError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::DeserializationError(_) => {
                Self::MalformedPersistedState(err.to_string())
            }
            MigrationError::SerializationError(_) => Self::Serialization {
                format: "migration".to_string(),
                message: err.to_string(),
            },
            MigrationError::IoError { .. } => Self::Io {
                message: err.to_string(),
            },
            _ => Self::Migration(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, NutriError>`.
pub type Result<T> = std::result::Result<T, NutriError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let converted: NutriError = err.into();
        assert!(matches!(converted, NutriError::Serialization { ref format, .. } if format == "JSON"));
    }

    #[test]
    fn test_display_includes_message() {
        let err = NutriError::validation("invalid age");
        assert_eq!(err.to_string(), "Validation error: invalid age");
    }
}
