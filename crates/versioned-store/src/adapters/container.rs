//! # Container Resolution
//!
//! Maps a configuration's container (private, or shared by group identifier)
//! onto a directory holding both backends:
//!
//! ```text
//! <root_dir>/                     private container
//! <shared_root>/<group>/          shared container
//!     settings.bin                settings backend
//!     files/                      file backend
//! ```

use crate::adapters::files::DirectoryFileStore;
use crate::adapters::settings::FileSettingsStore;
use crate::domain::errors::PersistenceError;
use crate::ports::outbound::BackendResolver;
use std::path::{Component, Path, PathBuf};

/// Settings file name inside a container.
pub const SETTINGS_FILE: &str = "settings.bin";

/// File backend directory inside a container.
pub const FILES_DIR: &str = "files";

/// Where containers live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Private container directory.
    pub root_dir: PathBuf,
    /// Parent directory of shared containers. `None` disables shared containers.
    pub shared_root: Option<PathBuf>,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./data"),
            shared_root: None,
        }
    }
}

impl StorageLayout {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            shared_root: None,
        }
    }

    /// Enable shared containers under `shared_root`.
    pub fn with_shared_root(mut self, shared_root: impl Into<PathBuf>) -> Self {
        self.shared_root = Some(shared_root.into());
        self
    }

    /// Create a layout from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `VSTORE_ROOT`: Private container directory (default: ./data)
    /// - `VSTORE_SHARED_ROOT`: Shared container parent (default: unset, disabled)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            root_dir: lookup("VSTORE_ROOT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            shared_root: lookup("VSTORE_SHARED_ROOT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Directory of the container for `group`.
    pub fn container_dir(&self, group: Option<&str>) -> Result<PathBuf, PersistenceError> {
        let Some(group) = group else {
            return Ok(self.root_dir.clone());
        };

        let shared_root = self
            .shared_root
            .as_ref()
            .ok_or_else(|| failed(Some(group), "no shared container root is configured"))?;

        if !is_single_component(group) {
            return Err(failed(
                Some(group),
                "group identifier must be a single path component",
            ));
        }

        Ok(shared_root.join(group))
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn failed(group: Option<&str>, reason: impl Into<String>) -> PersistenceError {
    PersistenceError::FailedToInitiate {
        container: match group {
            Some(g) => format!("group '{}'", g),
            None => "private container".to_string(),
        },
        reason: reason.into(),
    }
}

/// Resolves containers to `FileSettingsStore` + `DirectoryFileStore`.
#[derive(Debug, Clone, Default)]
pub struct DirectoryResolver {
    layout: StorageLayout,
}

impl DirectoryResolver {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }
}

impl BackendResolver for DirectoryResolver {
    type Settings = FileSettingsStore;
    type Files = DirectoryFileStore;

    fn resolve(
        &self,
        group: Option<&str>,
    ) -> Result<(Self::Settings, Self::Files), PersistenceError> {
        let dir = self.layout.container_dir(group)?;

        std::fs::create_dir_all(&dir).map_err(|e| failed(group, e.to_string()))?;
        let files = DirectoryFileStore::open(dir.join(FILES_DIR))
            .map_err(|e| failed(group, e.to_string()))?;
        let settings = FileSettingsStore::open(dir.join(SETTINGS_FILE));

        tracing::debug!("[vstore] Resolved container at {}", dir.display());
        Ok((settings, files))
    }
}
