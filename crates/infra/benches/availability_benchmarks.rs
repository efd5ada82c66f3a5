use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use posflag_availability::{AvailabilityFlag, AvailabilityStore};
use posflag_core::ItemId;
use posflag_infra::{CatalogRegistry, InMemoryStore};

/// Catalog where every third item is explicitly hidden and every third is unset.
fn seeded(size: usize) -> (AvailabilityStore<Arc<InMemoryStore>, Arc<InMemoryStore>>, Vec<ItemId>) {
    let backing = Arc::new(InMemoryStore::new());
    let store = AvailabilityStore::new(backing.clone(), backing.clone());
    let mut ids = Vec::with_capacity(size);
    for i in 0..size {
        let id = ItemId::new();
        backing.register_item(id).unwrap();
        match i % 3 {
            0 => store.initialize_default_flag(id).unwrap(),
            1 => store.set_flag(id, AvailabilityFlag::Disallowed).unwrap(),
            _ => {}
        }
        ids.push(id);
    }
    (store, ids)
}

fn bench_is_allowed(c: &mut Criterion) {
    let (store, ids) = seeded(3);
    let mut group = c.benchmark_group("is_allowed");
    for (name, id) in [("flagged", ids[0]), ("explicit", ids[1]), ("unset", ids[2])] {
        group.bench_function(name, |b| b.iter(|| store.is_allowed(black_box(id))));
    }
    group.bench_function("missing", |b| {
        let ghost = ItemId::new();
        b.iter(|| store.is_allowed(black_box(ghost)))
    });
    group.finish();
}

fn bench_filter_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_allowed");
    for size in [100usize, 1_000, 10_000] {
        let (store, ids) = seeded(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ids, |b, ids| {
            b.iter(|| store.filter_allowed(black_box(ids.iter().copied())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_is_allowed, bench_filter_listing);
criterion_main!(benches);
