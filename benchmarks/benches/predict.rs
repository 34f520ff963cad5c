use benchmarks::SyntheticHorses;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stride_regression::{FittedModel, OrdinaryLeastSquares, Regressor};

fn fitted_model() -> FittedModel {
    let dataset = SyntheticHorses::new(42).dataset(1_000);
    OrdinaryLeastSquares::default()
        .fit(&dataset)
        .expect("synthetic data must fit")
}

fn bench_predict_single(c: &mut Criterion) {
    let model = fitted_model();
    c.bench_function("predict_single", |b| {
        b.iter(|| black_box(model.predict(black_box(2.30), black_box(7.5))))
    });
    c.bench_function("predict_with_range", |b| {
        b.iter(|| black_box(model.predict_with_range(black_box(2.30), black_box(7.5))))
    });
}

fn bench_predict_batch(c: &mut Criterion) {
    let model = fitted_model();
    let mut group = c.benchmark_group("predict_batch");
    for n in [10, 100, 1_000, 10_000] {
        let dataset = SyntheticHorses::new(9).dataset(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, ds| {
            b.iter(|| black_box(model.predict_batch(black_box(ds))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_predict_single, bench_predict_batch);
criterion_main!(benches);
