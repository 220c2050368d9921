use crate::domain::errors::BackendError;
use crate::ports::outbound::SettingsStore;
use std::collections::HashMap;

/// In-memory settings store for unit tests.
#[derive(Debug, Default, Clone)]
pub struct InMemorySettingsStore {
    data: HashMap<String, Vec<u8>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        self.data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        self.data.remove(key);
        Ok(())
    }
}
