//! Criterion micro-benchmarks for arena allocation, free, and replacement.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use linb64_arena::{Arena, ArenaConfig};

/// Benchmark: allocate + free in stack order, no growth.
fn bench_alloc_free_stack(c: &mut Criterion) {
    let mut arena = Arena::new(ArenaConfig::default()).unwrap();
    c.bench_function("arena_alloc_free_stack", |b| {
        b.iter(|| {
            let a = arena.allocate(black_box(512)).unwrap();
            let inner = arena.allocate(black_box(1024)).unwrap();
            black_box(arena.free(inner));
            black_box(arena.free(a));
        });
    });
}

/// Benchmark: scoped lease with a write to every byte.
fn bench_lease_fill(c: &mut Criterion) {
    let mut arena = Arena::new(ArenaConfig::default()).unwrap();
    c.bench_function("arena_lease_fill_4k", |b| {
        b.iter(|| {
            arena
                .with_lease(4096, |lease| {
                    lease.bytes_mut().fill(0x5A);
                    black_box(lease.bytes()[4095]);
                })
                .unwrap();
        });
    });
}

/// Benchmark: growth from one page to ~1 MiB then replacement.
fn bench_grow_and_replace(c: &mut Criterion) {
    let mut arena = Arena::new(ArenaConfig::default()).unwrap();
    c.bench_function("arena_grow_replace_1mb", |b| {
        b.iter(|| {
            let block = arena.allocate(1_048_576).unwrap();
            arena.free(block);
            black_box(arena.settle().unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_alloc_free_stack,
    bench_lease_fill,
    bench_grow_and_replace
);
criterion_main!(benches);
