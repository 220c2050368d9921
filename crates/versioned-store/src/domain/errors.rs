//! # Domain Errors
//!
//! Error types for the versioned store.
//!
//! ## Design Principles
//!
//! - Construction errors (`InvalidVersion`, `FailedToInitiate`, `VersionTooLow`)
//!   abort creation; no partially built store is ever returned
//! - Per-call errors (`DataNotFound`, `SerializationFailed`) never change store state
//! - "Missing" and "corrupt" are distinct variants

use crate::domain::config::StorageType;
use thiserror::Error;

/// Errors surfaced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Configured version is zero (INVARIANT-1).
    #[error("Invalid schema version {version}: must be greater than zero")]
    InvalidVersion { version: u32 },

    /// Backends could not be resolved for the configuration.
    #[error("Failed to initiate storage for {container}: {reason}")]
    FailedToInitiate { container: String, reason: String },

    /// Persisted version is newer than the configured one (INVARIANT-2).
    #[error("Stored schema version {stored} is newer than requested version {requested}")]
    VersionTooLow { stored: u32, requested: u32 },

    /// Nothing stored under this key, or it could not be read.
    #[error("No data found for key '{key}' in {storage} storage")]
    DataNotFound { key: String, storage: StorageType },

    /// Value could not be encoded or decoded.
    #[error("Serialization failed for key '{key}': {message}")]
    SerializationFailed { key: String, message: String },

    /// Caller tried to use a reserved metadata name (INVARIANT-6).
    #[error("Key '{key}' is reserved for store metadata")]
    ReservedKey { key: String },

    /// A backend write failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl PersistenceError {
    /// Whether this is a "not present yet" condition the caller may recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::DataNotFound { .. })
    }
}

/// Errors raised by settings and file backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// I/O error during read/write.
    #[error("Backend I/O error: {message}")]
    Io { message: String },
    /// Persisted backend data could not be parsed.
    #[error("Backend corruption: {message}")]
    Corruption { message: String },
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Io {
            message: err.to_string(),
        }
    }
}

/// Serializer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl SerializationError {
    /// Attach the key being encoded or decoded.
    pub fn for_key(self, key: &str) -> PersistenceError {
        PersistenceError::SerializationFailed {
            key: key.to_string(),
            message: self.message,
        }
    }
}
