//! # Persistence API Implementation
//!
//! Implements the PersistenceApi trait for save/load/delete operations.

use super::*;
use crate::domain::config::{reserved, StorageType};
use crate::ports::inbound::PersistenceApi;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reject reserved metadata names (INVARIANT-6).
fn ensure_caller_key(key: &str) -> Result<(), PersistenceError> {
    if reserved::is_reserved(key) {
        return Err(PersistenceError::ReservedKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

impl<S, F, Z> PersistenceApi for VersionedStore<S, F, Z>
where
    S: SettingsStore,
    F: FileStore,
    Z: ValueSerializer,
{
    fn save_data(
        &mut self,
        data: &[u8],
        key: &str,
        storage: StorageType,
    ) -> Result<(), PersistenceError> {
        ensure_caller_key(key)?;

        self.blobs.put(key, data, storage)?;
        self.record_key(key);

        tracing::debug!(
            "[vstore] Saved {} bytes under '{}' ({})",
            data.len(),
            key,
            storage
        );
        Ok(())
    }

    fn load_data(&self, key: &str, storage: StorageType) -> Result<Vec<u8>, PersistenceError> {
        ensure_caller_key(key)?;
        self.blobs.get(key, storage)
    }

    fn save<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        key: &str,
        storage: StorageType,
    ) -> Result<(), PersistenceError> {
        ensure_caller_key(key)?;

        let data = self
            .serializer
            .encode(value)
            .map_err(|e| e.for_key(key))?;
        self.save_data(&data, key, storage)
    }

    fn load<T: DeserializeOwned>(
        &self,
        key: &str,
        storage: StorageType,
    ) -> Result<T, PersistenceError> {
        let data = self.load_data(key, storage)?;
        self.serializer.decode(&data).map_err(|e| e.for_key(key))
    }

    fn delete(&mut self, key: &str, storage: StorageType) -> Result<(), PersistenceError> {
        ensure_caller_key(key)?;

        // The registry is left alone: it tracks "ever written" (INVARIANT-4).
        self.blobs.remove(key, storage)?;

        tracing::debug!("[vstore] Deleted '{}' ({})", key, storage);
        Ok(())
    }
}
