use crate::domain::errors::BackendError;
use crate::ports::outbound::FileStore;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

/// File store backed by one directory, one file per name.
///
/// Writes go through a temp file and a rename so a crash never leaves a
/// half-written file under the real name.
#[derive(Debug, Clone)]
pub struct DirectoryFileStore {
    root: PathBuf,
}

impl DirectoryFileStore {
    /// Open (and create if needed) the directory at `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, BackendError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Resolve `name` inside the root. Names must be a single normal path
    /// component so nothing can escape the directory.
    fn path_for(&self, name: &str) -> Result<PathBuf, BackendError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(BackendError::Io {
                message: format!("invalid file name '{}'", name),
            }),
        }
    }
}

impl FileStore for DirectoryFileStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let path = self.path_for(name)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), BackendError> {
        let path = self.path_for(name)?;
        let temp_path = self.root.join(format!(".{}.tmp", name));

        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), BackendError> {
        let path = self.path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
