//! # Adapters Module
//!
//! Implementations of the outbound ports, plus the blob-store dispatch that the
//! service uses to reach them.
//!
//! ## Modules
//!
//! - `settings`: `SettingsStore` implementations (in-memory, single file)
//! - `files`: `FileStore` implementations (in-memory, directory)
//! - `serializer`: `ValueSerializer` implementations (JSON, bincode)
//! - `blob`: Uniform put/get/remove over both backends, keyed by `StorageType`
//! - `container`: On-disk container layout and `BackendResolver`

pub mod blob;
pub mod container;
pub mod files;
pub mod serializer;
pub mod settings;

pub use blob::{file_name_for_key, BlobStore};
pub use container::{DirectoryResolver, StorageLayout, FILES_DIR, SETTINGS_FILE};
pub use files::{DirectoryFileStore, InMemoryFileStore};
pub use serializer::{BincodeSerializer, JsonSerializer};
pub use settings::{FileSettingsStore, InMemorySettingsStore};
