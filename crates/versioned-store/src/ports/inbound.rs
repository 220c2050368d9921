//! # Inbound Ports (Driving Ports)
//!
//! The public API of a live store. A value implementing this trait has already
//! passed the version gate; there is no "not yet initialized" state.

use crate::domain::config::StorageType;
use crate::domain::errors::PersistenceError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Save, load and delete operations, each against an explicit backend.
pub trait PersistenceApi {
    /// Write raw bytes, then register the key.
    ///
    /// ## Registration (INVARIANT-4, INVARIANT-5)
    ///
    /// The key is added to the key registry. The registry snapshot is only
    /// rewritten the first time a key is seen, and a failed rewrite never
    /// fails the save.
    ///
    /// ## Errors
    ///
    /// - `ReservedKey`: `key` is a metadata name
    /// - `Backend`: the backend write failed
    fn save_data(
        &mut self,
        data: &[u8],
        key: &str,
        storage: StorageType,
    ) -> Result<(), PersistenceError>;

    /// Read raw bytes. Does not touch the registry.
    ///
    /// ## Errors
    ///
    /// - `DataNotFound`: nothing stored under `key`, or the file is unreadable
    /// - `ReservedKey`: `key` is a metadata name
    fn load_data(&self, key: &str, storage: StorageType) -> Result<Vec<u8>, PersistenceError>;

    /// Serialize `value` and save it.
    ///
    /// ## Errors
    ///
    /// - `SerializationFailed`: `value` could not be encoded (nothing is written)
    /// - everything `save_data` returns
    fn save<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        key: &str,
        storage: StorageType,
    ) -> Result<(), PersistenceError>;

    /// Load and deserialize a value.
    ///
    /// ## Errors
    ///
    /// - `DataNotFound`: as in `load_data`
    /// - `SerializationFailed`: bytes exist but do not decode as `T`
    fn load<T: DeserializeOwned>(&self, key: &str, storage: StorageType)
        -> Result<T, PersistenceError>;

    /// Remove a key from one backend.
    ///
    /// Deleting an absent key succeeds. The key stays in the registry: the
    /// registry tracks "ever written" and is only cleared by a version upgrade.
    fn delete(&mut self, key: &str, storage: StorageType) -> Result<(), PersistenceError>;

    /// Whether `key` currently has a value in `storage`.
    fn contains(&self, key: &str, storage: StorageType) -> Result<bool, PersistenceError> {
        match self.load_data(key, storage) {
            Ok(_) => Ok(true),
            Err(PersistenceError::DataNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
