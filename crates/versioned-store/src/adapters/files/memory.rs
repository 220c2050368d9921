use crate::domain::errors::BackendError;
use crate::ports::outbound::FileStore;
use std::collections::HashMap;

/// In-memory file store for unit tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFileStore {
    files: HashMap<String, Vec<u8>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all files currently present.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl FileStore for InMemoryFileStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.files.get(name).cloned())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), BackendError> {
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), BackendError> {
        self.files.remove(name);
        Ok(())
    }
}
