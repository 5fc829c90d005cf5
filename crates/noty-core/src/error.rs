//! Error types for the Noty editor core.

use thiserror::Error;

/// A shared error type for the entire Noty application.
///
/// Variants follow how each failure is handled:
/// - `Decode`: a persisted document is malformed; callers quarantine it and fall back.
/// - `Io`: a read or write failed; reported to the user, the operation is aborted.
/// - `Validation`: a value was rejected locally (unsupported language, unknown action).
/// - `DuplicateTabId` / `Internal`: an internal invariant was broken; fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotyError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Malformed persisted document
    #[error("Decode error: {format} - {message}")]
    Decode {
        format: String, // "JSON", "session", "settings"
        message: String,
    },

    /// A value rejected at its point of use
    #[error("Validation error: {0}")]
    Validation(String),

    /// Two live tabs would share the same identifier
    #[error("Internal error: cannot create two tabs with the same ID ({0})")]
    DuplicateTabId(u64),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NotyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Decode error for the given document format
    pub fn decode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the process must stop after reporting this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateTabId(_) | Self::Internal(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for NotyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NotyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, NotyError>`.
pub type Result<T> = std::result::Result<T, NotyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(NotyError::DuplicateTabId(3).is_fatal());
        assert!(NotyError::internal("missing renderer").is_fatal());
        assert!(!NotyError::io("disk full").is_fatal());
        assert!(!NotyError::validation("unsupported language").is_fatal());
        assert!(!NotyError::decode("JSON", "eof").is_fatal());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: NotyError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_conversion_is_decode() {
        let err: NotyError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(err.is_decode());
    }
}
