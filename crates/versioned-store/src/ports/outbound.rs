//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the versioned store. The store never reaches for
//! global state: backends come in through these traits, so two stores over
//! different backends are fully isolated.

use crate::domain::errors::{BackendError, PersistenceError, SerializationError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Lightweight settings store: one byte blob per string key.
///
/// Production: `FileSettingsStore`
/// Testing: `InMemorySettingsStore`
pub trait SettingsStore: Send {
    /// Get a value by key. `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Set a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), BackendError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), BackendError>;
}

/// Flat file store rooted in one directory.
///
/// Production: `DirectoryFileStore`
/// Testing: `InMemoryFileStore`
pub trait FileStore: Send {
    /// Read a file. `Ok(None)` when it does not exist.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Create or overwrite a file.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), BackendError>;

    /// Delete a file. Deleting an absent file is not an error.
    fn remove(&mut self, name: &str) -> Result<(), BackendError>;
}

/// Pluggable value encoding.
pub trait ValueSerializer: Send + Sync {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializationError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError>;
}

/// Resolves a configuration's container into concrete backends.
///
/// Called once per store construction; the resulting handles are immutable
/// for the store's lifetime.
pub trait BackendResolver {
    type Settings: SettingsStore;
    type Files: FileStore;

    /// Resolve the private container (`None`) or a shared one.
    ///
    /// ## Errors
    ///
    /// - `FailedToInitiate`: the container cannot provide both backends
    fn resolve(&self, group: Option<&str>)
        -> Result<(Self::Settings, Self::Files), PersistenceError>;
}

// Borrowed backends let a caller keep ownership across store lifetimes.

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        (**self).remove(key)
    }
}

impl<F: FileStore + ?Sized> FileStore for &mut F {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).read(name)
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), BackendError> {
        (**self).write(name, bytes)
    }

    fn remove(&mut self, name: &str) -> Result<(), BackendError> {
        (**self).remove(name)
    }
}
