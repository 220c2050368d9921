use crate::domain::errors::BackendError;
use crate::ports::outbound::SettingsStore;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Settings store persisted as a single file.
///
/// The whole map is held in memory and rewritten on every mutation, which is
/// fine for the small number of entries a settings store holds.
pub struct FileSettingsStore {
    data: HashMap<String, Vec<u8>>,
    path: PathBuf,
}

impl FileSettingsStore {
    /// Open the settings file at `path`.
    ///
    /// A missing or corrupt file opens as an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => Self::decode(&bytes).unwrap_or_else(|| {
                tracing::warn!(
                    "[vstore] Settings file {} is corrupt, starting empty",
                    path.display()
                );
                HashMap::new()
            }),
            Err(_) => {
                tracing::debug!("[vstore] No settings file at {}", path.display());
                HashMap::new()
            }
        };

        if !data.is_empty() {
            tracing::debug!(
                "[vstore] Loaded {} settings from {}",
                data.len(),
                path.display()
            );
        }

        Self { data, path }
    }

    // Format: [key_len:u32][key][value_len:u32][value]...
    fn decode(bytes: &[u8]) -> Option<HashMap<String, Vec<u8>>> {
        let mut data = HashMap::new();
        let mut cursor = 0;

        while cursor < bytes.len() {
            let key = Self::read_chunk(bytes, &mut cursor)?;
            let value = Self::read_chunk(bytes, &mut cursor)?;
            let key = String::from_utf8(key.to_vec()).ok()?;
            data.insert(key, value.to_vec());
        }

        Some(data)
    }

    fn read_chunk<'a>(bytes: &'a [u8], cursor: &mut usize) -> Option<&'a [u8]> {
        let len_end = cursor.checked_add(4)?;
        let len = u32::from_le_bytes(bytes.get(*cursor..len_end)?.try_into().ok()?) as usize;
        let end = len_end.checked_add(len)?;
        let chunk = bytes.get(len_end..end)?;
        *cursor = end;
        Some(chunk)
    }

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key.as_bytes());
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }
        bytes
    }

    fn save_to_file(&self) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(&self.encode())?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Persist the map, putting `key` back to `previous` if the write fails so
    /// memory never runs ahead of the file.
    fn save_or_restore(
        &mut self,
        key: &str,
        previous: Option<Vec<u8>>,
    ) -> Result<(), BackendError> {
        let result = self.save_to_file();
        if result.is_err() {
            match previous {
                Some(value) => self.data.insert(key.to_string(), value),
                None => self.data.remove(key),
            };
        }
        result
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        let previous = self.data.insert(key.to_string(), value.to_vec());
        self.save_or_restore(key, previous)
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        let Some(previous) = self.data.remove(key) else {
            return Ok(());
        };
        self.save_or_restore(key, Some(previous))
    }
}
