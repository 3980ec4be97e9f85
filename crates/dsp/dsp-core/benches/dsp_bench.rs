//! Benchmark suite for the streaming filters.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dsp_api::PipelineConfig;
use dsp_core::{
    bandpass_filter, compute_fisher_transform, compute_mama_fama, cyber_cycle, decycler,
    roofing_filter, run_many, super_smoother, MamaFama,
};

fn create_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let trend = i as f64 * 0.05;
            let noise = (i as f64 * 0.3).sin() * 3.0;
            100.0 + trend + noise
        })
        .collect()
}

fn bench_mama(c: &mut Criterion) {
    let mut group = c.benchmark_group("MamaFama");

    for size in [1_000, 10_000].iter() {
        let data = create_test_data(*size);

        group.bench_with_input(BenchmarkId::new("batch", size), &data, |b, data| {
            b.iter(|| compute_mama_fama(black_box(data), 0.5, 0.05))
        });

        group.bench_with_input(BenchmarkId::new("streaming", size), &data, |b, data| {
            b.iter(|| {
                let mut engine = MamaFama::default();
                for &price in data.iter() {
                    black_box(engine.push(price));
                }
            })
        });
    }

    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let data = create_test_data(10_000);
    let mut group = c.benchmark_group("Filters");

    group.bench_function("bandpass", |b| b.iter(|| bandpass_filter(black_box(&data), 20, 0.3)));
    group.bench_function("super_smoother", |b| b.iter(|| super_smoother(black_box(&data), 10)));
    group.bench_function("roofing", |b| b.iter(|| roofing_filter(black_box(&data), 48, 10)));
    group.bench_function("cyber_cycle", |b| b.iter(|| cyber_cycle(black_box(&data), 10)));
    group.bench_function("decycler", |b| b.iter(|| decycler(black_box(&data), 125)));
    group.bench_function("fisher", |b| b.iter(|| compute_fisher_transform(black_box(&data), 10)));

    group.finish();
}

fn bench_run_many(c: &mut Criterion) {
    let series: Vec<(String, Vec<f64>)> = (0..16)
        .map(|i| (format!("SYM{}", i), create_test_data(2_000 + i * 10)))
        .collect();
    let refs: Vec<(&str, &[f64])> = series.iter().map(|(s, d)| (s.as_str(), d.as_slice())).collect();
    let config = PipelineConfig::default();

    c.bench_function("run_many_16_series", |b| b.iter(|| run_many(&config, black_box(&refs))));
}

criterion_group!(benches, bench_mama, bench_filters, bench_run_many);
criterion_main!(benches);
