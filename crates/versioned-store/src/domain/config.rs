//! # Value Objects
//!
//! Immutable configuration and value types for the versioned store.

use crate::domain::errors::PersistenceError;
use std::fmt;
use std::num::NonZeroU32;

/// Configuration handed to the store at construction.
///
/// Immutable once the store is built. `version` is validated before any
/// backend is touched (INVARIANT-1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// Schema version. Raising it wipes all previously stored data.
    pub version: u32,

    /// Shared container identifier.
    ///
    /// When `None` the private container is used. When set, the resolver must
    /// map it to both a settings store and a directory, or construction fails
    /// with `FailedToInitiate`.
    pub group_identifier: Option<String>,
}

impl PersistenceConfig {
    /// Create a configuration for the private container.
    pub fn new(version: u32) -> Self {
        Self {
            version,
            group_identifier: None,
        }
    }

    /// Use a shared container instead of the private one.
    pub fn with_group_identifier(mut self, group: impl Into<String>) -> Self {
        self.group_identifier = Some(group.into());
        self
    }

    /// Validate the configured version.
    pub fn schema_version(&self) -> Result<SchemaVersion, PersistenceError> {
        SchemaVersion::try_from(self.version)
    }
}

/// A validated, strictly positive schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion(NonZeroU32);

impl SchemaVersion {
    /// The raw version number.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for SchemaVersion {
    type Error = PersistenceError;

    fn try_from(version: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(version)
            .map(SchemaVersion)
            .ok_or(PersistenceError::InvalidVersion { version })
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Which backend a key lives in.
///
/// A key may exist in both backends at once; the store never reconciles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// The lightweight settings store (one byte blob per key).
    Settings,
    /// One file per key inside the container directory.
    File,
}

impl StorageType {
    /// Both backends, in wipe order.
    pub const ALL: [StorageType; 2] = [StorageType::Settings, StorageType::File];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Settings => "settings",
            StorageType::File => "file",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved metadata names.
///
/// Callers can never read or write these (INVARIANT-6). The registry snapshot
/// name is not valid hex, so it cannot collide with an encoded caller file
/// name either.
pub mod reserved {
    /// Settings key holding the persisted schema version marker.
    pub const VERSION_MARKER_KEY: &str = "__vstore.schema_version";

    /// File name holding the key registry snapshot.
    pub const KEY_REGISTRY_FILE: &str = "__vstore_key_registry";

    /// Whether a caller-supplied key collides with a reserved name.
    pub fn is_reserved(key: &str) -> bool {
        key == VERSION_MARKER_KEY || key == KEY_REGISTRY_FILE
    }
}
