//! Settings Adapters
//!
//! Implementations of the `SettingsStore` trait.

mod file;
mod memory;

pub use file::FileSettingsStore;
pub use memory::InMemorySettingsStore;
