//! Error types for Pantry
//!
//! All modules use `PantryResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Pantry operations
pub type PantryResult<T> = Result<T, PantryError>;

/// All errors that can occur in Pantry
#[derive(Error, Debug)]
pub enum PantryError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown configuration key: {0}")]
    ConfigKey(String),

    // Persistence API errors
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} rejected with status {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    #[error("Update requires a record id")]
    MissingId,

    #[error("{failed} of {total} deletions failed while clearing the inventory")]
    PartialClear { failed: usize, total: usize },

    // Intake service errors
    #[error("No product found for barcode {0}")]
    BarcodeNotFound(String),

    #[error("Unusable response from {service}: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl PantryError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a transport error for a named API operation
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { operation, source }
    }

    /// Create a non-success status error
    pub fn status(operation: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            operation,
            status,
            message: message.into(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::PartialClear { .. } => true,
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Transport { source, .. } if source.is_connect() => {
                Some("Is the server running? Check server.base_url or pass --server")
            }
            Self::Transport { source, .. } if source.is_timeout() => {
                Some("Raise server.timeout_secs or check the network")
            }
            Self::PartialClear { .. } => {
                Some("Some records may already be gone on the server. Run: pantry list")
            }
            Self::ConfigKey(_) => Some("Run: pantry config show"),
            Self::BarcodeNotFound(_) => Some("Add it by hand: pantry add <name>"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PantryError::status("create", 500, "Create failed");
        assert_eq!(err.to_string(), "create rejected with status 500: Create failed");
    }

    #[test]
    fn error_hint() {
        let err = PantryError::PartialClear { failed: 1, total: 3 };
        assert!(err.hint().unwrap().contains("pantry list"));
        assert_eq!(PantryError::MissingId.hint(), None);
    }

    #[test]
    fn error_retryable() {
        assert!(PantryError::status("delete", 503, "").is_retryable());
        assert!(PantryError::status("delete", 429, "").is_retryable());
        assert!(!PantryError::status("delete", 404, "").is_retryable());
        assert!(!PantryError::MissingId.is_retryable());
    }
}
