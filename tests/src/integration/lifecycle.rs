//! # Store Lifecycle Tests
//!
//! Each test opens, drops and reopens stores over one temporary container,
//! so every assertion goes through the on-disk settings file, blob files and
//! registry snapshot rather than in-memory state.
//!
//! ## Flow
//!
//! ```text
//! open(v1) → save → drop → open(v1) → load      (data survives restart)
//! open(v1) → save → drop → open(v2) → load      (DataNotFound, marker = 2)
//! open(v2) → drop → open(v1)                    (VersionTooLow, nothing touched)
//! ```

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use serde::{Deserialize, Serialize};
    use versioned_store::adapters::{
        file_name_for_key, BincodeSerializer, DirectoryFileStore, DirectoryResolver,
        FileSettingsStore, StorageLayout, FILES_DIR, SETTINGS_FILE,
    };
    use versioned_store::domain::config::reserved::KEY_REGISTRY_FILE;
    use versioned_store::{
        GateDecision, PersistenceApi, PersistenceConfig, PersistenceError, SchemaVersion,
        StorageType, VersionedStore,
    };

    type DiskStore = VersionedStore<FileSettingsStore, DirectoryFileStore>;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn open(root: &Path, version: u32) -> Result<DiskStore, PersistenceError> {
        let resolver = DirectoryResolver::new(StorageLayout::new(root));
        VersionedStore::open(&PersistenceConfig::new(version), &resolver)
    }

    fn snapshot_path(root: &Path) -> PathBuf {
        root.join(FILES_DIR).join(KEY_REGISTRY_FILE)
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        visits: u64,
        tags: Vec<String>,
    }

    fn sample_profile() -> Profile {
        Profile {
            name: "Giovanni".to_string(),
            visits: 7,
            tags: vec!["admin".to_string(), "beta".to_string()],
        }
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    #[test]
    fn test_zero_version_creates_nothing_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("container");

        let result = open(&root, 0);

        assert!(matches!(
            result,
            Err(PersistenceError::InvalidVersion { version: 0 })
        ));
        assert!(!root.exists());
    }

    #[test]
    fn test_first_run_then_reopen_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();

        let store = open(dir.path(), 4).unwrap();
        assert_eq!(
            store.gate_decision(),
            GateDecision::FirstRun {
                target: SchemaVersion::try_from(4).unwrap()
            }
        );
        drop(store);

        let store = open(dir.path(), 4).unwrap();
        assert!(matches!(store.gate_decision(), GateDecision::Unchanged { .. }));
    }

    // =========================================================================
    // SAVE / LOAD / DELETE
    // =========================================================================

    #[test]
    fn test_round_trip_survives_restart_in_both_backends() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        for storage in StorageType::ALL {
            store.save(&sample_profile(), "profile", storage).unwrap();
        }
        drop(store);

        let store = open(dir.path(), 1).unwrap();
        for storage in StorageType::ALL {
            let loaded: Profile = store.load("profile", storage).unwrap();
            assert_eq!(loaded, sample_profile());
        }
    }

    #[test]
    fn test_file_backend_writes_hex_named_blob() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store
            .save_data(b"raw", "photos/2024 01.jpg", StorageType::File)
            .unwrap();

        let path = dir
            .path()
            .join(FILES_DIR)
            .join(file_name_for_key("photos/2024 01.jpg"));
        assert_eq!(fs::read(path).unwrap(), b"raw");
    }

    #[test]
    fn test_long_and_multibyte_keys_round_trip_in_both_backends() {
        let dir = tempfile::tempdir().unwrap();
        let keys = ["k".repeat(200), "ключ-🔑".repeat(30), "k".repeat(117)];

        let mut store = open(dir.path(), 1).unwrap();
        for key in &keys {
            for storage in StorageType::ALL {
                store.save(&key.len(), key, storage).unwrap();
            }
        }
        drop(store);

        let mut store = open(dir.path(), 1).unwrap();
        for key in &keys {
            for storage in StorageType::ALL {
                assert_eq!(store.load::<usize>(key, storage).unwrap(), key.len());
            }
            store.delete(key, StorageType::File).unwrap();
            assert!(store
                .load_data(key, StorageType::File)
                .unwrap_err()
                .is_not_found());
        }
    }

    #[test]
    fn test_long_file_keys_are_wiped_on_upgrade() {
        let dir = tempfile::tempdir().unwrap();
        let key = "k".repeat(200);

        let mut store = open(dir.path(), 1).unwrap();
        store.save_data(b"v", &key, StorageType::File).unwrap();
        drop(store);

        let store = open(dir.path(), 2).unwrap();
        assert!(store
            .load_data(&key, StorageType::File)
            .unwrap_err()
            .is_not_found());
        let blob = dir.path().join(FILES_DIR).join(file_name_for_key(&key));
        assert!(!blob.exists());
    }

    #[test]
    fn test_failed_settings_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store.save_data(b"old", "k", StorageType::Settings).unwrap();

        // A directory where the settings temp file goes blocks every write.
        let blocker = dir.path().join(SETTINGS_FILE).with_extension("tmp");
        fs::create_dir(&blocker).unwrap();

        assert!(matches!(
            store.save_data(b"new", "k", StorageType::Settings),
            Err(PersistenceError::Backend(_))
        ));
        assert_eq!(store.load_data("k", StorageType::Settings).unwrap(), b"old");
        drop(store);

        fs::remove_dir(&blocker).unwrap();
        let store = open(dir.path(), 1).unwrap();
        assert_eq!(store.load_data("k", StorageType::Settings).unwrap(), b"old");
    }

    #[test]
    fn test_delete_is_idempotent_across_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store.save(&"bye", "temp", StorageType::File).unwrap();
        store.delete("temp", StorageType::File).unwrap();
        drop(store);

        let mut store = open(dir.path(), 1).unwrap();
        assert!(store
            .load_data("temp", StorageType::File)
            .unwrap_err()
            .is_not_found());
        store.delete("temp", StorageType::File).unwrap();
        store.delete("never-written", StorageType::Settings).unwrap();
        assert!(store.is_registered("temp"));
    }

    #[test]
    fn test_unreadable_blob_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store.save_data(b"v", "k", StorageType::File).unwrap();

        // A directory where the blob should be cannot be read as a file.
        let path = dir.path().join(FILES_DIR).join(file_name_for_key("k"));
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(matches!(
            store.load_data("k", StorageType::File),
            Err(PersistenceError::DataNotFound { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_is_serialization_failure_not_missing() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store.save(&"just a string", "value", StorageType::Settings).unwrap();

        let result: Result<Profile, _> = store.load("value", StorageType::Settings);
        assert!(matches!(
            result,
            Err(PersistenceError::SerializationFailed { .. })
        ));
    }

    #[test]
    fn test_bincode_serializer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = DirectoryResolver::new(StorageLayout::new(dir.path()));
        let config = PersistenceConfig::new(1);

        let mut store =
            VersionedStore::open_with_serializer(&config, &resolver, BincodeSerializer).unwrap();
        store.save(&sample_profile(), "profile", StorageType::File).unwrap();
        drop(store);

        let store =
            VersionedStore::open_with_serializer(&config, &resolver, BincodeSerializer).unwrap();
        let loaded: Profile = store.load("profile", StorageType::File).unwrap();
        assert_eq!(loaded, sample_profile());
    }

    // =========================================================================
    // KEY REGISTRY
    // =========================================================================

    #[test]
    fn test_second_save_leaves_snapshot_untouched() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store.save_data(b"1", "counter", StorageType::Settings).unwrap();
        let first = fs::read(snapshot_path(dir.path())).unwrap();

        // Remove the snapshot: a rewrite would recreate it.
        fs::remove_file(snapshot_path(dir.path())).unwrap();
        store.save_data(b"2", "counter", StorageType::Settings).unwrap();

        assert!(!snapshot_path(dir.path()).exists());
        assert!(!first.is_empty());
    }

    #[test]
    fn test_registry_reloaded_after_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store.save_data(b"a", "alpha", StorageType::Settings).unwrap();
        store.save_data(b"b", "beta", StorageType::File).unwrap();
        drop(store);

        let store = open(dir.path(), 1).unwrap();
        let keys: Vec<&str> = store.registered_keys().collect();
        assert_eq!(keys, vec!["alpha", "beta"]);
    }

    // =========================================================================
    // VERSION GATE
    // =========================================================================

    #[test]
    fn test_list_of_strings_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let list = vec!["Joao".to_string(), "Giovanni".to_string()];

        let mut store = open(dir.path(), 1).unwrap();
        store.save(&list, "kListOfStrings", StorageType::Settings).unwrap();
        drop(store);

        let store = open(dir.path(), 1).unwrap();
        let loaded: Vec<String> = store.load("kListOfStrings", StorageType::Settings).unwrap();
        assert_eq!(loaded, list);
        drop(store);

        let store = open(dir.path(), 2).unwrap();
        let result: Result<Vec<String>, _> = store.load("kListOfStrings", StorageType::Settings);
        assert!(matches!(
            result,
            Err(PersistenceError::DataNotFound { ref key, storage: StorageType::Settings })
                if key == "kListOfStrings"
        ));
    }

    #[test]
    fn test_upgrade_wipes_both_backends_and_advances_marker() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 3).unwrap();
        for storage in StorageType::ALL {
            store.save_data(b"old", "k", storage).unwrap();
        }
        drop(store);

        let store = open(dir.path(), 4).unwrap();
        assert!(matches!(
            store.gate_decision(),
            GateDecision::Upgrade { from: 3, .. }
        ));
        for storage in StorageType::ALL {
            assert!(store.load_data("k", storage).unwrap_err().is_not_found());
        }
        assert!(!dir
            .path()
            .join(FILES_DIR)
            .join(file_name_for_key("k"))
            .exists());
        assert!(!snapshot_path(dir.path()).exists());
        drop(store);

        // Marker now reads 4: reopening at 4 is a no-op, at 3 is refused.
        assert!(matches!(
            open(dir.path(), 4).unwrap().gate_decision(),
            GateDecision::Unchanged { .. }
        ));
        assert!(matches!(
            open(dir.path(), 3),
            Err(PersistenceError::VersionTooLow {
                stored: 4,
                requested: 3
            })
        ));
    }

    #[test]
    fn test_upgrade_skipping_versions_still_wipes() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 1).unwrap();
        store.save_data(b"x", "k", StorageType::Settings).unwrap();
        drop(store);

        let store = open(dir.path(), 10).unwrap();
        assert!(store
            .load_data("k", StorageType::Settings)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_keys_saved_after_upgrade_survive_next_restart() {
        let dir = tempfile::tempdir().unwrap();

        drop(open(dir.path(), 1).unwrap());
        let mut store = open(dir.path(), 2).unwrap();
        store.save_data(b"fresh", "k", StorageType::File).unwrap();
        drop(store);

        let store = open(dir.path(), 2).unwrap();
        assert_eq!(store.load_data("k", StorageType::File).unwrap(), b"fresh");
    }

    #[test]
    fn test_downgrade_leaves_files_untouched() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = open(dir.path(), 2).unwrap();
        store.save_data(b"s", "k", StorageType::Settings).unwrap();
        store.save_data(b"f", "k", StorageType::File).unwrap();
        drop(store);
        let snapshot_before = fs::read(snapshot_path(dir.path())).unwrap();

        assert!(matches!(
            open(dir.path(), 1),
            Err(PersistenceError::VersionTooLow {
                stored: 2,
                requested: 1
            })
        ));

        assert_eq!(fs::read(snapshot_path(dir.path())).unwrap(), snapshot_before);
        let store = open(dir.path(), 2).unwrap();
        assert!(matches!(store.gate_decision(), GateDecision::Unchanged { .. }));
        for (storage, expected) in [(StorageType::Settings, b"s"), (StorageType::File, b"f")] {
            assert_eq!(store.load_data("k", storage).unwrap(), expected);
        }
    }
}
