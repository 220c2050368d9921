//! Serializer Adapters
//!
//! Implementations of the `ValueSerializer` trait.

mod bincode;
mod json;

pub use self::bincode::BincodeSerializer;
pub use self::json::JsonSerializer;
