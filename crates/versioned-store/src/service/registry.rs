//! # Key Registry Persistence
//!
//! Load, record and clear against the reserved snapshot file. Every failure
//! here is logged and swallowed: the registry never blocks startup or a save.

use super::*;
use crate::domain::config::reserved::KEY_REGISTRY_FILE;
use crate::domain::registry::{decode_snapshot, encode_snapshot};

impl<S, F, Z> VersionedStore<S, F, Z>
where
    S: SettingsStore,
    F: FileStore,
    Z: ValueSerializer,
{
    /// Read the snapshot. Missing, unreadable or corrupt all yield an empty registry.
    pub(crate) fn load_registry(blobs: &BlobStore<S, F>) -> KeyRegistry {
        let bytes = match blobs.files().read(KEY_REGISTRY_FILE) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!("[vstore] No key registry snapshot found");
                return KeyRegistry::new();
            }
            Err(e) => {
                tracing::warn!("[vstore] Key registry snapshot unreadable: {}", e);
                return KeyRegistry::new();
            }
        };

        match decode_snapshot(&bytes) {
            Ok(registry) => {
                tracing::debug!("[vstore] Loaded {} registered keys", registry.len());
                registry
            }
            Err(e) => {
                tracing::warn!("[vstore] Discarding corrupt key registry snapshot: {}", e);
                KeyRegistry::new()
            }
        }
    }

    /// Register `key`, rewriting the snapshot only on first sight (INVARIANT-5).
    pub(crate) fn record_key(&mut self, key: &str) {
        if !self.registry.insert(key) {
            return;
        }

        let bytes = match encode_snapshot(&self.registry) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    "[vstore] Key '{}' registered in memory only, snapshot encoding failed: {}",
                    key,
                    e
                );
                return;
            }
        };

        if let Err(e) = self.blobs.files_mut().write(KEY_REGISTRY_FILE, &bytes) {
            tracing::warn!(
                "[vstore] Key '{}' registered in memory only, snapshot write failed: {}",
                key,
                e
            );
        }
    }

    /// Empty the registry and delete its snapshot.
    pub(crate) fn clear_registry(&mut self) {
        self.registry.clear();

        if let Err(e) = self.blobs.files_mut().remove(KEY_REGISTRY_FILE) {
            tracing::warn!("[vstore] Failed to delete key registry snapshot: {}", e);
        }
    }
}
