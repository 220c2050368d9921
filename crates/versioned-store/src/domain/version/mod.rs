//! # Version Gate
//!
//! Decides, once per store construction, what happens to previously stored
//! data given the persisted version marker and the configured version.
//!
//! - `gate` - Decision table
//! - `marker` - On-disk encoding of the version marker

mod gate;
mod marker;


pub use gate::{evaluate, GateDecision};
pub use marker::{decode_marker, encode_marker, MARKER_LEN, UNINITIALIZED};
