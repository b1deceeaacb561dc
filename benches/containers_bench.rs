//! Benchmarks for the containers against their std counterparts
//!
//! - RingBuffer vs VecDeque (bounded FIFO traffic)
//! - Deque vs VecDeque (growth from a small arena)
//! - HashTable vs std::HashMap (insertion and lookup)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use algometer::{Deque, HashTable, RingBuffer};

// =============================================================================
// BENCHMARK CONFIGURATION
// =============================================================================

const SIZES: &[usize] = &[100, 1_000, 10_000];
const RING_CAPACITY: usize = 64;

fn random_keys(size: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..size).map(|_| rng.gen()).collect()
}

// =============================================================================
// QUEUE BENCHMARKS
// =============================================================================

fn bench_ring_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer_fifo");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("RingBuffer", size), &size, |b, &size| {
            let mut ring = RingBuffer::new(RING_CAPACITY).unwrap();
            b.iter(|| {
                for i in 0..size {
                    if !ring.enqueue(black_box(i)) {
                        black_box(ring.dequeue());
                        ring.enqueue(i);
                    }
                }
                ring.clear();
            });
        });

        group.bench_with_input(BenchmarkId::new("VecDeque", size), &size, |b, &size| {
            let mut queue = VecDeque::with_capacity(RING_CAPACITY);
            b.iter(|| {
                for i in 0..size {
                    if queue.len() == RING_CAPACITY {
                        black_box(queue.pop_front());
                    }
                    queue.push_back(black_box(i));
                }
                queue.clear();
            });
        });
    }

    group.finish();
}

fn bench_deque_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_growth");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Deque", size), &size, |b, &size| {
            b.iter(|| {
                let mut deque = Deque::new(16).unwrap();
                for i in 0..size {
                    if i % 2 == 0 {
                        deque.add_back(black_box(i));
                    } else {
                        deque.add_front(black_box(i));
                    }
                }
                black_box(deque)
            });
        });

        group.bench_with_input(BenchmarkId::new("VecDeque", size), &size, |b, &size| {
            b.iter(|| {
                let mut deque = VecDeque::with_capacity(16);
                for i in 0..size {
                    if i % 2 == 0 {
                        deque.push_back(black_box(i));
                    } else {
                        deque.push_front(black_box(i));
                    }
                }
                black_box(deque)
            });
        });
    }

    group.finish();
}

// =============================================================================
// HASH TABLE BENCHMARKS
// =============================================================================

fn bench_hash_table_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_table_insertion");

    for &size in SIZES {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("HashTable", size), &keys, |b, keys| {
            b.iter(|| {
                let mut table = HashTable::new(16, 0.75).unwrap();
                for &k in keys {
                    table.put(black_box(k), k);
                }
                black_box(table)
            });
        });

        group.bench_with_input(BenchmarkId::new("std::HashMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = HashMap::new();
                for &k in keys {
                    map.insert(black_box(k), k);
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

fn bench_hash_table_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_table_lookup");

    for &size in SIZES {
        let keys = random_keys(size);
        let mut table = HashTable::new(16, 0.75).unwrap();
        let mut map = HashMap::new();
        for &k in &keys {
            table.put(k, k);
            map.insert(k, k);
        }
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("HashTable", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(table.get(k));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("std::HashMap", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(map.get(k));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// BENCHMARK GROUPS
// =============================================================================

criterion_group!(
    container_benches,
    bench_ring_buffer,
    bench_deque_growth,
    bench_hash_table_insertion,
    bench_hash_table_lookup
);

criterion_main!(container_benches);
