//! Benchmarks for search, sort and the measurement harness itself

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use algometer::{
    linear_search, merge_sort, sort_strings_case_insensitive, AnalyzerConfig, BinarySearch, ComplexityAnalyzer,
    MetricsTracker,
};

const SIZES: &[usize] = &[1_000, 10_000, 100_000];

fn random_data(size: usize) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size).map(|_| rng.gen_range(0..1_000_000)).collect()
}

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");
    group.measurement_time(Duration::from_secs(3));

    for &size in SIZES {
        let data = random_data(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("merge_sort", size), &data, |b, data| {
            b.iter(|| black_box(merge_sort(data.clone())));
        });

        group.bench_with_input(BenchmarkId::new("std_stable_sort", size), &data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                v.sort();
                black_box(v)
            });
        });
    }

    let words: Vec<String> = random_data(10_000)
        .into_iter()
        .map(|n| format!("{}Key{}", if n % 2 == 0 { "a" } else { "B" }, n))
        .collect();
    group.bench_function("case_insensitive_strings_10000", |b| {
        b.iter(|| black_box(sort_strings_case_insensitive(words.clone())));
    });

    group.finish();
}

fn bench_searching(c: &mut Criterion) {
    let mut group = c.benchmark_group("searching");

    for &size in SIZES {
        let mut data = random_data(size);
        data.sort_unstable();
        let targets: Vec<u32> = data.iter().step_by((size / 100).max(1)).copied().collect();
        group.throughput(Throughput::Elements(targets.len() as u64));

        group.bench_with_input(BenchmarkId::new("binary_search", size), &targets, |b, targets| {
            let search = BinarySearch::new();
            b.iter(|| {
                for t in targets {
                    black_box(search.search(&data, t));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("linear_search", size), &targets, |b, targets| {
            b.iter(|| {
                for t in targets {
                    black_box(linear_search::search(&data, t));
                }
            });
        });
    }

    group.finish();
}

fn bench_instrumentation_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("instrumentation");

    let tracker = Arc::new(MetricsTracker::new());
    group.bench_function("measurement_context", |b| {
        b.iter(|| {
            let context = tracker.start_measurement("bench");
            black_box(context.complete())
        });
    });

    group.sample_size(10);
    group.bench_function("analyzer_linear_pass", |b| {
        let config = AnalyzerConfig::new(256, 4_096, 2, 3);
        let mut analyzer = ComplexityAnalyzer::with_config(config).unwrap();
        b.iter(|| {
            black_box(
                analyzer
                    .measure_time_complexity(random_data, |v| v.iter().map(|&x| x as u64).sum::<u64>())
                    .unwrap(),
            )
        });
    });

    group.finish();
}

criterion_group!(algorithm_benches, bench_sorting, bench_searching, bench_instrumentation_overhead);
criterion_main!(algorithm_benches);
