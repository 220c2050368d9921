//! # Versioned Store
//!
//! A small local persistence layer. Values are stored under string keys in one
//! of two interchangeable backends (a settings store, or individual files in a
//! directory), and a schema version guards all of it: raising the version wipes
//! every key ever written, lowering it is refused.
//!
//! ## Startup Sequence
//!
//! ```text
//! PersistenceConfig ──validate──→ resolve backends ──→ load key registry
//!                                                           │
//!                                                           ↓
//!                                                     [Version Gate]
//!                                     first run / unchanged / upgrade (wipe) / downgrade (reject)
//!                                                           │
//!                                                           ↓
//!                                                 VersionedStore is live
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Positive Version | `version == 0` is rejected before any storage access |
//! | 2 | No Downgrade | Stored version above the configured one fails construction |
//! | 3 | Epoch Wipe | An upgrade removes every registered key from both backends |
//! | 4 | Ever-Written Registry | Every successful save registers its key; delete keeps it |
//! | 5 | Single Rewrite | The registry snapshot is rewritten only on first sight of a key |
//! | 6 | Reserved Names | Metadata keys are never readable or writable by callers |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (config, errors, key registry, version gate)
//! - `ports/` - Port traits (inbound facade API, outbound backend SPI)
//! - `adapters/` - Backend, serializer and container-resolution implementations
//! - `service/` - The `VersionedStore` facade
//!
//! ## Usage
//!
//! ```ignore
//! use versioned_store::{PersistenceApi, PersistenceConfig, StorageType, VersionedStore};
//! use versioned_store::adapters::{DirectoryResolver, StorageLayout};
//!
//! let resolver = DirectoryResolver::new(StorageLayout::new("./data"));
//! let mut store = VersionedStore::open(&PersistenceConfig::new(1), &resolver)?;
//!
//! store.save(&vec!["Joao", "Giovanni"], "kListOfStrings", StorageType::Settings)?;
//! let names: Vec<String> = store.load("kListOfStrings", StorageType::Settings)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use domain::config::{PersistenceConfig, SchemaVersion, StorageType};
pub use domain::errors::{BackendError, PersistenceError, SerializationError};
pub use domain::registry::KeyRegistry;
pub use domain::version::GateDecision;
pub use ports::inbound::PersistenceApi;
pub use ports::outbound::{BackendResolver, FileStore, SettingsStore, ValueSerializer};
pub use service::{PersistenceDependencies, VersionedStore};
