use crate::domain::config::SchemaVersion;

/// Marker value meaning "never initialized".
pub const UNINITIALIZED: u32 = 0;

/// Encoded marker length: one big-endian `u32`.
pub const MARKER_LEN: usize = 4;

pub fn encode_marker(version: SchemaVersion) -> [u8; MARKER_LEN] {
    version.get().to_be_bytes()
}

/// Decode a stored marker. `None` for anything that is not exactly
/// `MARKER_LEN` bytes.
pub fn decode_marker(bytes: &[u8]) -> Option<u32> {
    let raw: [u8; MARKER_LEN] = bytes.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}
