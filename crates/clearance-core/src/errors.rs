//! Unified error type for clearance operations
//!
//! Access-denied outcomes of read/write checks are plain `false` values and
//! never appear here. Errors are reserved for refused mutations, malformed
//! permission keys, and collaborator failures.

use serde::{Deserialize, Serialize};

/// Unified error type for all clearance operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ClearanceError {
    /// Acting principal lacks the admin role required for a mutation
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Which operation was refused and for whom
        message: String,
    },

    /// A permission key outside the canonical action x level vocabulary
    #[error("Invalid permission: {key}")]
    InvalidPermission {
        /// The rejected key as submitted
        key: String,
    },

    /// Principal or resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Backing store failure
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },
}

impl ClearanceError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an invalid permission error for the submitted key
    pub fn invalid_permission(key: impl Into<String>) -> Self {
        Self::InvalidPermission { key: key.into() }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// True for the error returned when a non-admin attempts a mutation
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Standard Result type for clearance operations
pub type Result<T> = std::result::Result<T, ClearanceError>;

impl From<std::io::Error> for ClearanceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            _ => Self::storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClearanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_key() {
        let err = ClearanceError::invalid_permission("read_5");
        assert_eq!(err.to_string(), "Invalid permission: read_5");
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(
            ClearanceError::from(io),
            ClearanceError::NotFound { .. }
        ));
    }

    #[test]
    fn unauthorized_predicate() {
        assert!(ClearanceError::unauthorized("nope").is_unauthorized());
        assert!(!ClearanceError::invalid("bad").is_unauthorized());
    }
}
