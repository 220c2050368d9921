//! # Version Gate Execution
//!
//! Applies the decision from `domain::version::evaluate` to the backends.

use super::*;
use crate::domain::config::reserved::VERSION_MARKER_KEY;
use crate::domain::config::StorageType;
use crate::domain::version::{self, decode_marker, encode_marker, UNINITIALIZED};

impl<S, F, Z> VersionedStore<S, F, Z>
where
    S: SettingsStore,
    F: FileStore,
    Z: ValueSerializer,
{
    /// Run the gate once. Must follow `load_registry`.
    ///
    /// A downgrade returns before anything is written (INVARIANT-2).
    pub(crate) fn run_version_gate(&mut self) -> Result<GateDecision, PersistenceError> {
        let stored = self.read_version_marker()?;
        let decision = version::evaluate(stored, self.version)?;

        match decision {
            GateDecision::FirstRun { target } => {
                tracing::info!("[vstore] First run, stamping schema {}", target);
            }
            GateDecision::Unchanged { version } => {
                tracing::debug!("[vstore] Schema {} unchanged", version);
            }
            GateDecision::Upgrade { from, to } => {
                tracing::info!(
                    "[vstore] Upgrading schema v{} -> {}, wiping {} registered keys",
                    from,
                    to,
                    self.registry.len()
                );
                self.wipe_registered_keys();
            }
        }

        if decision.stamps_marker() {
            self.blobs
                .settings_mut()
                .set(VERSION_MARKER_KEY, &encode_marker(decision.accepted_version()))?;
        }

        Ok(decision)
    }

    /// Persisted marker, `UNINITIALIZED` when absent or malformed.
    fn read_version_marker(&self) -> Result<u32, PersistenceError> {
        let Some(bytes) = self.blobs.settings().get(VERSION_MARKER_KEY)? else {
            return Ok(UNINITIALIZED);
        };

        Ok(decode_marker(&bytes).unwrap_or_else(|| {
            tracing::warn!(
                "[vstore] Malformed version marker ({} bytes), treating as uninitialized",
                bytes.len()
            );
            UNINITIALIZED
        }))
    }

    /// Remove every registered key from both backends, then clear the registry.
    fn wipe_registered_keys(&mut self) {
        let keys: Vec<String> = self.registry.iter().map(str::to_string).collect();

        for key in &keys {
            for storage in StorageType::ALL {
                // Per-key removal is best-effort; the key usually lives in one backend only.
                if let Err(e) = self.blobs.remove(key, storage) {
                    tracing::warn!(
                        "[vstore] Wipe of '{}' from {} storage failed: {}",
                        key,
                        storage,
                        e
                    );
                }
            }
        }

        self.clear_registry();
    }
}
