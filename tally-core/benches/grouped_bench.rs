//! Benchmarks for grouped-result derived queries over a wide two-level
//! hierarchy (100 groups x 100 subgroups).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_core::{GroupedResult, GroupedValue};

fn build_two_level(groups: usize, subgroups: usize) -> GroupedResult {
    let entries = (0..groups).map(|g| {
        let inner = GroupedResult::from_entries(
            (0..subgroups).map(|s| (format!("sub{s}"), (s as i64) + 1)),
            None,
        )
        .unwrap();
        (format!("group{g}"), GroupedValue::from(inner))
    });
    GroupedResult::from_entries(entries, None).unwrap()
}

fn bench_total(c: &mut Criterion) {
    let result = build_two_level(100, 100);
    c.bench_function("total_100x100", |b| {
        b.iter(|| black_box(&result).total().unwrap())
    });
}

fn bench_leaf_count(c: &mut Criterion) {
    let result = build_two_level(100, 100);
    c.bench_function("leaf_values_count_refresh_100x100", |b| {
        b.iter(|| black_box(&result).leaf_values_count(false, true))
    });
}

fn bench_percent_probe(c: &mut Criterion) {
    let result = build_two_level(100, 100);
    c.bench_function("probe_percent_100x100", |b| {
        b.iter(|| black_box(&result).probe("group42_percent"))
    });
}

criterion_group!(benches, bench_total, bench_leaf_count, bench_percent_probe);
criterion_main!(benches);
