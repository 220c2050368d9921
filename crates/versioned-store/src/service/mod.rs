//! # Versioned Store Service
//!
//! The facade implementing `PersistenceApi`.
//!
//! ## Architecture
//!
//! Construction is the only place with ordering rules:
//! 1. Validate the configured version (before any backend access)
//! 2. Resolve backends for the configured container
//! 3. Load the key registry snapshot (best-effort)
//! 4. Run the version gate (may wipe, may reject)
//!
//! A store value only exists once all four steps succeeded.

mod gate;
mod persistence;
mod registry;

use crate::adapters::{BlobStore, JsonSerializer};
use crate::domain::config::{PersistenceConfig, SchemaVersion};
use crate::domain::errors::PersistenceError;
use crate::domain::registry::KeyRegistry;
use crate::domain::version::GateDecision;
use crate::ports::outbound::{BackendResolver, FileStore, SettingsStore, ValueSerializer};

/// The versioned store.
///
/// Holds its resolved backends and its in-memory key registry exclusively.
/// There is no internal locking: writes take `&mut self`.
pub struct VersionedStore<S, F, Z = JsonSerializer>
where
    S: SettingsStore,
    F: FileStore,
    Z: ValueSerializer,
{
    /// Both backends of the resolved container.
    pub(crate) blobs: BlobStore<S, F>,
    /// Value encoder for the typed save/load variants.
    pub(crate) serializer: Z,
    /// Every key saved since the last upgrade (INVARIANT-4).
    pub(crate) registry: KeyRegistry,
    /// Version accepted by the gate.
    pub(crate) version: SchemaVersion,
    /// What the gate decided at construction.
    pub(crate) gate_decision: GateDecision,
}

/// Injected backends and serializer.
pub struct PersistenceDependencies<S, F, Z> {
    pub settings: S,
    pub files: F,
    pub serializer: Z,
}

impl<S, F> VersionedStore<S, F, JsonSerializer>
where
    S: SettingsStore,
    F: FileStore,
{
    /// Open a store with the JSON serializer, resolving backends through `resolver`.
    ///
    /// ## Errors
    ///
    /// - `InvalidVersion`: `config.version == 0` (no backend is touched)
    /// - `FailedToInitiate`: the container cannot be resolved
    /// - `VersionTooLow`: the stored version is newer than `config.version`
    pub fn open<R>(config: &PersistenceConfig, resolver: &R) -> Result<Self, PersistenceError>
    where
        R: BackendResolver<Settings = S, Files = F>,
    {
        Self::open_with_serializer(config, resolver, JsonSerializer)
    }
}

impl<S, F, Z> VersionedStore<S, F, Z>
where
    S: SettingsStore,
    F: FileStore,
    Z: ValueSerializer,
{
    /// Open a store with a custom serializer.
    pub fn open_with_serializer<R>(
        config: &PersistenceConfig,
        resolver: &R,
        serializer: Z,
    ) -> Result<Self, PersistenceError>
    where
        R: BackendResolver<Settings = S, Files = F>,
    {
        let version = config.schema_version()?;
        let (settings, files) = resolver.resolve(config.group_identifier.as_deref())?;
        Self::initiate(version, BlobStore::new(settings, files), serializer)
    }

    /// Build a store over already-constructed backends.
    pub fn with_dependencies(
        config: &PersistenceConfig,
        deps: PersistenceDependencies<S, F, Z>,
    ) -> Result<Self, PersistenceError> {
        let version = config.schema_version()?;
        Self::initiate(
            version,
            BlobStore::new(deps.settings, deps.files),
            deps.serializer,
        )
    }

    fn initiate(
        version: SchemaVersion,
        blobs: BlobStore<S, F>,
        serializer: Z,
    ) -> Result<Self, PersistenceError> {
        let registry = Self::load_registry(&blobs);

        let mut store = Self {
            blobs,
            serializer,
            registry,
            version,
            gate_decision: GateDecision::Unchanged { version },
        };
        store.gate_decision = store.run_version_gate()?;

        Ok(store)
    }

    /// The schema version this store runs at.
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// What the version gate decided when this store was opened.
    pub fn gate_decision(&self) -> GateDecision {
        self.gate_decision
    }

    /// Keys saved since the last upgrade, including deleted ones.
    pub fn registered_keys(&self) -> impl Iterator<Item = &str> {
        self.registry.iter()
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.registry.contains(key)
    }

    /// Release the backends.
    pub fn into_backends(self) -> (S, F) {
        self.blobs.into_inner()
    }
}
