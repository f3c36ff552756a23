use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};
use boundary_tree::{TreeMap, TreeSet};

const N: usize = 10_000;

/// Sorted input turns the tree into a chain, so ordered runs use a smaller size.
const N_ORDERED: usize = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

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

fn bench_map_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("TreeMap", keys.len()), |b| {
        b.iter(|| {
            let mut map = TreeMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", keys.len()), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_ordered(c: &mut Criterion) {
    bench_map_insert(c, "map_insert_ordered", &ordered_keys(N_ORDERED));
}

fn bench_map_insert_random(c: &mut Criterion) {
    bench_map_insert(c, "map_insert_random", &random_keys(N));
}

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree_map: TreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("TreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = tree_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree_map: TreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_remove_random");

    group.bench_function(BenchmarkId::new("TreeMap", N), |b| {
        b.iter_batched(
            || tree_map.clone(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || bt_map.clone(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_map_walk(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree_map: TreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_walk_random");

    group.bench_function(BenchmarkId::new("TreeMap/cursor", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            if let Some(mut cursor) = tree_map.begin() {
                sum = sum.wrapping_add(*cursor.value());
                while cursor.move_next() {
                    sum = sum.wrapping_add(*cursor.value());
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("TreeMap/iter", N), |b| {
        b.iter(|| tree_map.values().fold(0i64, |acc, &v| acc.wrapping_add(v)));
    });

    group.bench_function(BenchmarkId::new("BTreeMap/iter", N), |b| {
        b.iter(|| bt_map.values().fold(0i64, |acc, &v| acc.wrapping_add(v)));
    });

    group.finish();
}

fn bench_map_clone(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree_map: TreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_clone_random");
    group.bench_function(BenchmarkId::new("TreeMap", N), |b| b.iter(|| tree_map.clone()));
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| b.iter(|| bt_map.clone()));
    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_insert_random");

    group.bench_function(BenchmarkId::new("TreeSet", N), |b| {
        b.iter(|| {
            let mut set = TreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_set_contains_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree_set: TreeSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("set_contains_random");

    group.bench_function(BenchmarkId::new("TreeSet", N), |b| {
        b.iter(|| keys.iter().filter(|k| tree_set.contains(*k)).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter(|k| bt_set.contains(*k)).count());
    });

    group.finish();
}

criterion_group!(map_benches, bench_map_insert_ordered, bench_map_insert_random, bench_map_get_random, bench_map_remove_random,);

criterion_group!(traversal_benches, bench_map_walk, bench_map_clone,);

criterion_group!(set_benches, bench_set_insert_random, bench_set_contains_random,);

criterion_main!(map_benches, traversal_benches, set_benches);
