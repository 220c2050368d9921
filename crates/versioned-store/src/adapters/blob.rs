//! # Blob Store
//!
//! Uniform `put/get/remove` over the two backends, selected by `StorageType`.
//! Pure pass-through: no caching, no registry, no policy.

use crate::domain::config::StorageType;
use crate::domain::errors::{BackendError, PersistenceError};
use crate::ports::outbound::{FileStore, SettingsStore};
use sha2::{Digest, Sha256};

/// Suffix appended to hex-encoded caller file names.
const BLOB_SUFFIX: &str = ".blob";

/// Suffix for names derived from a key digest.
const DIGEST_SUFFIX: &str = ".sha256.blob";

/// Longest hex name used as-is. Leaves room for the directory store's
/// `.{name}.tmp` temp file under the common 255-byte file name limit.
const MAX_HEX_NAME_LEN: usize = 240;

/// Map a caller key to its file name.
///
/// Lowercase hex of the UTF-8 bytes plus `.blob` when that fits in
/// `MAX_HEX_NAME_LEN`, otherwise the SHA-256 of the key plus `.sha256.blob`.
/// A hex name has no dot before its suffix, so the two forms never collide,
/// and neither can equal a reserved metadata file name.
pub fn file_name_for_key(key: &str) -> String {
    let hex_name = format!("{}{}", hex::encode(key.as_bytes()), BLOB_SUFFIX);
    if hex_name.len() <= MAX_HEX_NAME_LEN {
        return hex_name;
    }

    let digest = Sha256::digest(key.as_bytes());
    format!("{}{}", hex::encode(digest), DIGEST_SUFFIX)
}

/// Both backends of one resolved container.
pub struct BlobStore<S, F> {
    settings: S,
    files: F,
}

impl<S, F> BlobStore<S, F>
where
    S: SettingsStore,
    F: FileStore,
{
    pub fn new(settings: S, files: F) -> Self {
        Self { settings, files }
    }

    pub fn put(
        &mut self,
        key: &str,
        bytes: &[u8],
        storage: StorageType,
    ) -> Result<(), BackendError> {
        match storage {
            StorageType::Settings => self.settings.set(key, bytes),
            StorageType::File => self.files.write(&file_name_for_key(key), bytes),
        }
    }

    /// Read a key.
    ///
    /// A file that exists but cannot be read is reported as `DataNotFound`,
    /// the same as a missing one.
    pub fn get(&self, key: &str, storage: StorageType) -> Result<Vec<u8>, PersistenceError> {
        let found = match storage {
            StorageType::Settings => self.settings.get(key)?,
            StorageType::File => match self.files.read(&file_name_for_key(key)) {
                Ok(found) => found,
                Err(e) => {
                    tracing::debug!("[vstore] Unreadable file for key '{}': {}", key, e);
                    None
                }
            },
        };

        found.ok_or_else(|| PersistenceError::DataNotFound {
            key: key.to_string(),
            storage,
        })
    }

    /// Remove a key. Absent keys are not an error.
    pub fn remove(&mut self, key: &str, storage: StorageType) -> Result<(), BackendError> {
        match storage {
            StorageType::Settings => self.settings.remove(key),
            StorageType::File => self.files.remove(&file_name_for_key(key)),
        }
    }

    pub(crate) fn settings(&self) -> &S {
        &self.settings
    }

    pub(crate) fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub(crate) fn files(&self) -> &F {
        &self.files
    }

    pub(crate) fn files_mut(&mut self) -> &mut F {
        &mut self.files
    }

    pub fn into_inner(self) -> (S, F) {
        (self.settings, self.files)
    }
}
