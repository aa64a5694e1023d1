//! Criterion benchmarks for aggregation hot paths.
//!
//! Benchmarks:
//! 1. Ranked bucketing over a large entity pool
//! 2. Date-keyed alignment of many series
//! 3. Day-of-month downsampling of a decade-long series

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chainlens_core::domain::{Entity, NetworkRegistry, Series, SeriesPoint};
use chainlens_core::rank::bucket_by_rank;
use chainlens_core::series::{on_month_days, sum_aligned, DEFAULT_MONTH_DAYS};

fn make_entities(n: usize) -> Vec<Entity> {
    let mut entities = vec![
        Entity::new("bitcoin", "Bitcoin", 1.0e9),
        Entity::new("lightning", "Lightning", 5.0e6),
    ];
    entities.extend((0..n).map(|i| {
        let value = ((i * 7919) % 10_000) as f64 * 1.0e4;
        Entity::new(format!("network-{i}"), format!("Network {i}"), value)
    }));
    entities
}

fn make_series(days: usize, offset: usize) -> Series {
    let base = chrono::NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    (0..days)
        .map(|i| {
            let date = base + chrono::Duration::days((i + offset) as i64);
            SeriesPoint::new(date.format("%Y-%m-%d").to_string(), (i % 97) as f64)
        })
        .collect()
}

fn bench_bucket_by_rank(c: &mut Criterion) {
    let registry = NetworkRegistry::default_btc();
    let entities = make_entities(1000);

    c.bench_function("bucket_by_rank_1k", |b| {
        b.iter(|| {
            bucket_by_rank(
                black_box(&entities),
                |e| registry.is_anchor(&e.id),
                |e| registry.in_layers(&e.id),
            )
            .unwrap()
        })
    });
}

fn bench_sum_aligned(c: &mut Criterion) {
    let inputs: Vec<Series> = (0..10).map(|i| make_series(365, i * 3)).collect();

    c.bench_function("sum_aligned_10x365", |b| {
        b.iter(|| sum_aligned(black_box(&inputs)))
    });
}

fn bench_on_month_days(c: &mut Criterion) {
    let series = make_series(3650, 0);

    c.bench_function("on_month_days_3650", |b| {
        b.iter(|| on_month_days(black_box(&series), &DEFAULT_MONTH_DAYS))
    });
}

criterion_group!(
    benches,
    bench_bucket_by_rank,
    bench_sum_aligned,
    bench_on_month_days
);
criterion_main!(benches);
