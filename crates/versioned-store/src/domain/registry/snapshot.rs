//! # Registry Snapshot Codec
//!
//! Binary layout (bincode):
//!
//! ```text
//! [format: u16][keys: len-prefixed Vec<String>][checksum: u32]
//! ```
//!
//! The checksum is CRC32 over each key's `[len: u32 LE][utf8 bytes]`, so a
//! snapshot that decodes structurally but was truncated or bit-flipped inside a
//! key is still rejected.

use super::KeyRegistry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current snapshot format.
const SNAPSHOT_FORMAT: u16 = 1;

/// Upper bound on snapshot size, enforced on both encode and decode (16 MB).
pub const MAX_SNAPSHOT_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
struct RegistrySnapshot {
    format: u16,
    keys: Vec<String>,
    checksum: u32,
}

/// Snapshot codec errors.
///
/// The store treats every one of these as "empty registry"; they exist so
/// the reason can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding error: {message}")]
    Encoding { message: String },
    #[error("snapshot is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
    #[error("unsupported snapshot format {found}")]
    UnsupportedFormat { found: u16 },
    #[error("snapshot checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

fn compute_checksum<'a>(keys: impl Iterator<Item = &'a str>) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for key in keys {
        hasher.update(&(key.len() as u32).to_le_bytes());
        hasher.update(key.as_bytes());
    }
    hasher.finalize()
}

/// Encode the full registry.
///
/// Refuses to produce a snapshot the decoder would reject as too large.
pub fn encode_snapshot(registry: &KeyRegistry) -> Result<Vec<u8>, SnapshotError> {
    let keys: Vec<String> = registry.iter().map(str::to_string).collect();
    let snapshot = RegistrySnapshot {
        format: SNAPSHOT_FORMAT,
        checksum: compute_checksum(keys.iter().map(String::as_str)),
        keys,
    };

    let bytes = bincode::serialize(&snapshot).map_err(|e| SnapshotError::Encoding {
        message: e.to_string(),
    })?;
    if bytes.len() > MAX_SNAPSHOT_BYTES {
        return Err(SnapshotError::TooLarge {
            size: bytes.len(),
            max: MAX_SNAPSHOT_BYTES,
        });
    }

    Ok(bytes)
}

/// Decode and verify a snapshot.
pub fn decode_snapshot(bytes: &[u8]) -> Result<KeyRegistry, SnapshotError> {
    if bytes.len() > MAX_SNAPSHOT_BYTES {
        return Err(SnapshotError::TooLarge {
            size: bytes.len(),
            max: MAX_SNAPSHOT_BYTES,
        });
    }

    let snapshot: RegistrySnapshot =
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Encoding {
            message: e.to_string(),
        })?;

    if snapshot.format != SNAPSHOT_FORMAT {
        return Err(SnapshotError::UnsupportedFormat {
            found: snapshot.format,
        });
    }

    let actual = compute_checksum(snapshot.keys.iter().map(String::as_str));
    if actual != snapshot.checksum {
        return Err(SnapshotError::ChecksumMismatch {
            expected: snapshot.checksum,
            actual,
        });
    }

    Ok(snapshot.keys.into_iter().collect())
}
