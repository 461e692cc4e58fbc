// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use champ_map::champmap::{self, ChampMap, GenericChampMap};
use champ_map::shared_ptr::DefaultSharedPtr;
use criterion::{
    criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::hash::{BuildHasherDefault, Hasher};
use std::hint::black_box;

mod utils;
use utils::*;

const SIZES: &[usize] = &[10, 1000, 100_000];

/// Keys spelling their index in binary, as `"101"` for 5.
fn binary_keys(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("{:b}", i)).collect()
}

fn build<S>(keys: &[String]) -> GenericChampMap<String, usize, S, DefaultSharedPtr>
where
    S: std::hash::BuildHasher + Default + Clone,
{
    keys.iter().cloned().zip(0..).collect()
}

/// Keeps only the low `BITS` bits of an FNV-style mix, so that a map of
/// `n` keys has about `n / 2^BITS` entries in every collision node.
#[derive(Default)]
struct NarrowHasher<const BITS: u32>(u64);

impl<const BITS: u32> Hasher for NarrowHasher<BITS> {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = (self.0 ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3);
        }
    }

    fn finish(&self) -> u64 {
        self.0 & ((1 << BITS) - 1)
    }
}

type NarrowMap = GenericChampMap<String, usize, BuildHasherDefault<NarrowHasher<6>>, DefaultSharedPtr>;

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for &size in SIZES {
        let keys = binary_keys(size);
        let map: ChampMap<_, _> = build(&keys);
        let order = reorder(&keys);
        let misses: Vec<String> = (size..size * 2).map(|i| format!("{:b}", i)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("hit", size), &order, |b, order| {
            b.iter(|| order.iter().filter(|k| map.get(k.as_str()).is_some()).count())
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &misses, |b, misses| {
            b.iter(|| misses.iter().filter(|k| map.contains_key(k.as_str())).count())
        });
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for &size in SIZES {
        let keys = binary_keys(size);
        let map: ChampMap<_, _> = build(&keys);
        let order = reorder(&keys);
        let fresh: Vec<String> = (size..size * 2).map(|i| format!("{:b}", i)).collect();
        group.throughput(Throughput::Elements(size as u64));
        // Each update starts from the same base map, so only the path to
        // the key is copied.
        group.bench_with_input(BenchmarkId::new("replace", size), &order, |b, order| {
            b.iter(|| {
                for (i, k) in order.iter().enumerate() {
                    black_box(map.update(k.clone(), i));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("insert", size), &fresh, |b, fresh| {
            b.iter(|| {
                for (i, k) in fresh.iter().enumerate() {
                    black_box(map.update(k.clone(), i));
                }
            })
        });
        // A chain of versions, each built from the previous one.
        group.bench_with_input(BenchmarkId::new("build", size), &keys, |b, keys| {
            b.iter(|| {
                keys.iter()
                    .cloned()
                    .zip(0..)
                    .fold(ChampMap::new(), |m, (k, v)| m.update(k, v))
            })
        });
    }
    group.finish();
}

fn bench_without(c: &mut Criterion) {
    let mut group = c.benchmark_group("without");
    for &size in SIZES {
        let keys = binary_keys(size);
        let map: ChampMap<_, _> = build(&keys);
        let order = reorder(&keys);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("single", size), &order, |b, order| {
            b.iter(|| {
                for k in order {
                    black_box(map.without(k.as_str()));
                }
            })
        });
        // Remove everything, collapsing nodes all the way back to the root.
        group.bench_with_input(BenchmarkId::new("drain", size), &order, |b, order| {
            b.iter_batched(
                || map.clone(),
                |mut m| {
                    for k in order {
                        m = m.without(k.as_str());
                    }
                    m
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    for &size in SIZES {
        let keys = random_strings(size);
        let map: ChampMap<_, _> = build(&keys);
        group.bench_with_input(BenchmarkId::new("all", size), &map, |b, map| {
            b.iter(|| map.values().sum::<usize>())
        });
        group.bench_with_input(BenchmarkId::new("first_10", size), &map, |b, map| {
            b.iter(|| map.iter().take(10).count())
        });
    }
    group.finish();
}

fn bench_equal(c: &mut Criterion) {
    let mut group = c.benchmark_group("equal");
    for &size in SIZES {
        let keys = random_strings(size);
        let map: ChampMap<_, _> = build(&keys);
        // Same content, no shared nodes.
        let rebuilt: ChampMap<_, _> = build(&reorder(&keys));
        // Everything shared but the path to one key.
        let touched = map.update(keys[0].clone(), 0);
        group.bench_with_input(BenchmarkId::new("rebuilt", size), &rebuilt, |b, other| {
            b.iter(|| champmap::equal(&map, other))
        });
        group.bench_with_input(BenchmarkId::new("one_path", size), &touched, |b, other| {
            b.iter(|| champmap::equal(&map, other))
        });
    }
    group.finish();
}

fn bench_collisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("collisions");
    for &size in &[100, 1000] {
        let keys = binary_keys(size);
        let map: NarrowMap = build(&keys);
        let order = reorder(&keys);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("get", size), &order, |b, order| {
            b.iter(|| order.iter().filter(|k| map.get(k.as_str()).is_some()).count())
        });
        group.bench_with_input(BenchmarkId::new("update", size), &order, |b, order| {
            b.iter(|| {
                for (i, k) in order.iter().enumerate() {
                    black_box(map.update(k.clone(), i));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("without", size), &order, |b, order| {
            b.iter(|| {
                for k in order {
                    black_box(map.without(k.as_str()));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_get,
    bench_update,
    bench_without,
    bench_iter,
    bench_equal,
    bench_collisions
);
criterion_main!(benches);
