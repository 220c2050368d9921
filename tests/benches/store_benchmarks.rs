//! # Versioned Store Benchmarks
//!
//! | Operation | Backend | Notes |
//! |-----------|---------|-------|
//! | save (new key) | settings, file | includes one registry snapshot rewrite |
//! | save (known key) | settings, file | no snapshot rewrite |
//! | load | settings, file | JSON decode of a small list |
//! | open + upgrade | directory | wipe of N registered keys |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use versioned_store::adapters::{
    DirectoryResolver, InMemoryFileStore, InMemorySettingsStore, JsonSerializer, StorageLayout,
};
use versioned_store::{
    PersistenceApi, PersistenceConfig, PersistenceDependencies, StorageType, VersionedStore,
};

fn in_memory_store() -> VersionedStore<InMemorySettingsStore, InMemoryFileStore> {
    VersionedStore::with_dependencies(
        &PersistenceConfig::new(1),
        PersistenceDependencies {
            settings: InMemorySettingsStore::new(),
            files: InMemoryFileStore::new(),
            serializer: JsonSerializer,
        },
    )
    .unwrap()
}

fn sample_list() -> Vec<String> {
    (0..32).map(|i| format!("entry-{}", i)).collect()
}

fn bench_save_and_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("save-load");
    let list = sample_list();

    for storage in StorageType::ALL {
        let id = BenchmarkId::new("save_new_key", storage);
        group.bench_with_input(id, &storage, |b, &storage| {
            let mut store = in_memory_store();
            let mut i = 0u64;
            b.iter(|| {
                i += 1;
                store.save(&list, &format!("key-{}", i), storage).unwrap();
            })
        });

        let id = BenchmarkId::new("save_known_key", storage);
        group.bench_with_input(id, &storage, |b, &storage| {
            let mut store = in_memory_store();
            b.iter(|| store.save(&list, "key", storage).unwrap())
        });

        let id = BenchmarkId::new("load", storage);
        group.bench_with_input(id, &storage, |b, &storage| {
            let mut store = in_memory_store();
            store.save(&list, "key", storage).unwrap();
            b.iter(|| {
                let loaded: Vec<String> = store.load(black_box("key"), storage).unwrap();
                black_box(loaded)
            })
        });
    }

    group.finish();
}

fn bench_upgrade_wipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("upgrade");
    group.sample_size(10);

    for keys in [10usize, 100] {
        let id = BenchmarkId::new("wipe_registered_keys", keys);
        group.bench_with_input(id, &keys, |b, &keys| {
            b.iter_batched(
                || {
                    let dir = tempfile::tempdir().unwrap();
                    let resolver = DirectoryResolver::new(StorageLayout::new(dir.path()));
                    let mut store =
                        VersionedStore::open(&PersistenceConfig::new(1), &resolver).unwrap();
                    for i in 0..keys {
                        store
                            .save_data(b"payload", &format!("key-{}", i), StorageType::File)
                            .unwrap();
                    }
                    (dir, resolver)
                },
                |(dir, resolver)| {
                    let store =
                        VersionedStore::open(&PersistenceConfig::new(2), &resolver).unwrap();
                    black_box(store.gate_decision());
                    dir
                },
                BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_save_and_load, bench_upgrade_wipe);
criterion_main!(benches);
