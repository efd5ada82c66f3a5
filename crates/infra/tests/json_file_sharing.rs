//! Several `JsonFileStore` handles on one path, as separate CLI processes get.

use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;

use posflag_availability::{AvailabilityFlag, AvailabilityStore};
use posflag_core::ItemId;
use posflag_infra::{CatalogRegistry, JsonFileStore};

fn handle(path: &Path) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(path))
}

#[test]
fn concurrent_registrations_from_two_handles_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let per_handle = 50;

    let barrier = Arc::new(Barrier::new(2));
    let workers: Vec<_> = (0..2)
        .map(|_| {
            let store = handle(&path);
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..per_handle {
                    store.register_item(ItemId::new()).unwrap();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    assert_eq!(handle(&path).list_items().unwrap().len(), 2 * per_handle);
}

#[test]
fn explicit_flag_wins_against_initializer_on_another_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let admin_handle = handle(&path);
    let host_handle = handle(&path);
    let admin = AvailabilityStore::new(admin_handle.clone(), admin_handle.clone());
    let host = Arc::new(AvailabilityStore::new(host_handle.clone(), host_handle));

    for _ in 0..40 {
        let id = ItemId::new();
        admin_handle.register_item(id).unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let initializer = {
            let host = host.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                host.initialize_default_flag(id).unwrap();
            })
        };
        barrier.wait();
        admin.set_flag(id, AvailabilityFlag::Disallowed).unwrap();
        initializer.join().unwrap();

        // Whichever ran first, the explicit write is the one that sticks.
        assert_eq!(admin.flag(id), Some(AvailabilityFlag::Disallowed));
        assert_eq!(host.flag(id), Some(AvailabilityFlag::Disallowed));
    }
}
