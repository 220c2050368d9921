//! # Key Registry
//!
//! The durable set of every key passed to a successful save since the last
//! version upgrade.
//!
//! ## Module Structure
//!
//! - `set` - In-memory `KeyRegistry`
//! - `snapshot` - Checksummed snapshot codec for the on-disk copy

mod set;
mod snapshot;


pub use set::KeyRegistry;
pub use snapshot::{decode_snapshot, encode_snapshot, SnapshotError, MAX_SNAPSHOT_BYTES};
