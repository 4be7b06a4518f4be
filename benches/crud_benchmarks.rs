use bst_tree::{BstMap, BstTree};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;

const N: usize = 10_000;

/// Sorted input degrades the tree to a chain, so it is benchmarked on a smaller size.
const N_ORDERED: usize = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_insert_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.entry(k).or_insert(k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert_ordered");

    group.bench_function(BenchmarkId::new("BstMap", N_ORDERED), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for i in 0..N_ORDERED as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BstMap/hint_end", N_ORDERED), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for i in 0..N_ORDERED as i64 {
                map.insert_hint(map.end(), i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N_ORDERED), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N_ORDERED as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let bst_map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(bst_map.get(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(bt_map.get(k));
            }
        });
    });

    group.finish();
}

fn bench_map_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let bst_map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let mut group = c.benchmark_group("map_remove_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter_batched(
            || bst_map.clone(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || bt_map.clone(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Tree Benchmarks ────────────────────────────────────────────────────────

fn bench_tree_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: BstTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("tree_iterate");

    group.bench_function(BenchmarkId::new("BstTree/iter", N), |b| {
        b.iter(|| tree.iter().copied().sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BstTree/positions", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let mut position = tree.begin();
            while position != tree.end() {
                sum = sum.wrapping_add(*tree.get(position).unwrap());
                position = tree.next(position);
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| set.iter().copied().sum::<i64>());
    });

    group.finish();
}

fn bench_tree_bounds(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: BstTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("tree_lower_bound");

    group.bench_function(BenchmarkId::new("BstTree", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(tree.get(tree.lower_bound(&(k + 1))));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(set.range(k + 1..).next());
            }
        });
    });

    group.finish();
}

fn bench_tree_clone(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: BstTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("tree_clone");

    group.bench_function(BenchmarkId::new("BstTree", N), |b| b.iter(|| tree.clone()));
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| b.iter(|| set.clone()));

    group.finish();
}

criterion_group!(map_insert_benches, bench_map_insert_random, bench_map_insert_ordered,);

criterion_group!(map_lookup_benches, bench_map_get_random, bench_map_remove_random,);

criterion_group!(tree_benches, bench_tree_iterate, bench_tree_bounds, bench_tree_clone,);

criterion_main!(map_insert_benches, map_lookup_benches, tree_benches,);
