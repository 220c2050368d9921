use crate::domain::errors::SerializationError;
use crate::ports::outbound::ValueSerializer;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default value serializer using serde_json.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl ValueSerializer for JsonSerializer {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(value).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError> {
        serde_json::from_slice(bytes).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
