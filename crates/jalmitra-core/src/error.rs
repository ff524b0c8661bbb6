//! Error types for Jalmitra.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Jalmitra crate.
///
/// The first group of variants is the domain taxonomy surfaced to callers of
/// the state containers. The second group covers lower-level failures that
/// adapters convert into before they reach the domain.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JalmitraError {
    /// A profile update was rejected (missing identity).
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// A login was attempted without a usable user id.
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Sign-in credentials were rejected by the authenticator.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A manual sensor reading is out of range or empty.
    #[error("Invalid reading: {0}")]
    InvalidReading(String),

    /// A refresh against the sensor data source failed.
    #[error("Data fetch failed: {0}")]
    DataFetchFailed(String),

    /// The durable store could not be written.
    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JalmitraError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidProfile error
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile(message.into())
    }

    /// Creates an InvalidReading error
    ///
    /// # Arguments
    ///
    /// * `message` - Which value was rejected and why
    pub fn invalid_reading(message: impl Into<String>) -> Self {
        Self::InvalidReading(message.into())
    }

    /// Creates a DataFetchFailed error
    pub fn data_fetch_failed(message: impl Into<String>) -> Self {
        Self::DataFetchFailed(message.into())
    }

    /// Creates a StorageWriteFailed error
    pub fn storage_write_failed(message: impl Into<String>) -> Self {
        Self::StorageWriteFailed(message.into())
    }

    /// Creates a NotFound error
    ///
    /// # Arguments
    ///
    /// * `entity_type` - Kind of entity that was looked up, e.g. `"well"`
    /// * `id` - The identifier that had no match
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
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

    pub fn is_invalid_profile(&self) -> bool {
        matches!(self, Self::InvalidProfile(_))
    }

    pub fn is_data_fetch_failed(&self) -> bool {
        matches!(self, Self::DataFetchFailed(_))
    }

    pub fn is_storage_write_failed(&self) -> bool {
        matches!(self, Self::StorageWriteFailed(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the caller should block the attempted action and prompt for a retry.
    ///
    /// `DataFetchFailed` is deliberately excluded: stale data stays on screen with a
    /// non-blocking indicator instead.
    pub fn blocks_action(&self) -> bool {
        matches!(
            self,
            Self::InvalidProfile(_) | Self::StorageWriteFailed(_) | Self::InvalidReading(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for JalmitraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for JalmitraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for JalmitraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for JalmitraError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error for adapters that bubble up opaque errors.
impl From<anyhow::Error> for JalmitraError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, JalmitraError>`.
pub type Result<T> = std::result::Result<T, JalmitraError>;
