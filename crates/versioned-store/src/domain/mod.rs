//! # Domain Layer
//!
//! Pure domain logic for the versioned store.
//! Nothing in here touches a backend; side effects live in `service/`.
//!
//! ## Modules
//!
//! - `config` - Configuration and value types (PersistenceConfig, SchemaVersion, StorageType)
//! - `errors` - Domain error types
//! - `registry` - The set of every key ever saved, and its snapshot codec
//! - `version` - Version gate decision table

pub mod config;
pub mod errors;
pub mod registry;
pub mod version;
