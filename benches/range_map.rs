//! Benchmarks for AvlTreeRangeMap.
//!
//! Run with: `cargo bench --bench range_map`

use std::hint::black_box;

use collkit::range::{AvlTreeRangeMap, Range};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};

const RANGES: i64 = 4096;

fn populated() -> AvlTreeRangeMap<i64, i64> {
    let map = AvlTreeRangeMap::new();
    for i in 0..RANGES {
        map.insert(Range::new(i * 100, i * 100 + 100).unwrap(), i);
    }
    map
}

// ============================================================================
// Insert benchmarks
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_range_map");
    group.throughput(Throughput::Elements(RANGES as u64));

    group.bench_function("insert_ascending", |b| {
        b.iter(|| black_box(populated()))
    });

    group.bench_function("insert_rejected_overlap", |b| {
        let map = populated();
        b.iter(|| {
            for i in 0..RANGES {
                let r = Range::new(i * 100 + 10, i * 100 + 20).unwrap();
                black_box(map.insert(black_box(r), i));
            }
        })
    });

    group.finish();
}

// ============================================================================
// Lookup benchmarks
// ============================================================================

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_range_map");
    group.throughput(Throughput::Elements(RANGES as u64));

    let map = populated();
    group.bench_function("find_hit", |b| {
        b.iter(|| {
            for i in 0..RANGES {
                black_box(map.find(&black_box(i * 100 + 50)));
            }
        })
    });

    group.bench_function("find_miss", |b| {
        b.iter(|| {
            for i in 0..RANGES {
                black_box(map.find(&black_box(-i - 1)));
            }
        })
    });

    group.finish();
}

// ============================================================================
// Remove + size benchmarks
// ============================================================================

fn bench_remove_and_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_range_map");

    group.bench_function("remove_all", |b| {
        b.iter_batched(
            populated,
            |map| {
                for i in 0..RANGES {
                    black_box(map.remove(&Range::new(i * 100, i * 100 + 100).unwrap()));
                }
            },
            BatchSize::SmallInput,
        )
    });

    let map = populated();
    group.bench_function("size_walk", |b| b.iter(|| black_box(map.size())));

    group.finish();
}

criterion_group!(benches, bench_insert, bench_find, bench_remove_and_size);
criterion_main!(benches);
