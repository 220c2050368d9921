//! File Store Adapters
//!
//! Implementations of the `FileStore` trait.

mod directory;
mod memory;

pub use directory::DirectoryFileStore;
pub use memory::InMemoryFileStore;
