use crate::domain::errors::SerializationError;
use crate::ports::outbound::ValueSerializer;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Compact binary value serializer using bincode.
///
/// Not self-describing: a value must be loaded as the same type it was saved as.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeSerializer;

impl ValueSerializer for BincodeSerializer {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(value).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError> {
        bincode::deserialize(bytes).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
