use benchmarks::SyntheticHorses;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stride_regression::dataset::partition_by_age;
use stride_regression::linalg::{invert, invert_3x3, Tolerance};
use stride_regression::model::{fit_groups, NormalEquations};
use stride_regression::{OrdinaryLeastSquares, Regressor};

fn bench_fit(c: &mut Criterion) {
    let ols = OrdinaryLeastSquares::default();
    let mut group = c.benchmark_group("fit");
    for n in [10, 100, 1_000, 10_000, 100_000] {
        let dataset = SyntheticHorses::new(42).dataset(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, ds| {
            b.iter(|| black_box(ols.fit(black_box(ds))))
        });
    }
    group.finish();
}

fn bench_normal_equations(c: &mut Criterion) {
    let dataset = SyntheticHorses::new(42).dataset(10_000);
    c.bench_function("normal_equations_10000", |b| {
        b.iter(|| black_box(NormalEquations::accumulate(black_box(&dataset))))
    });
}

fn bench_inverse(c: &mut Criterion) {
    let gram = NormalEquations::accumulate(&SyntheticHorses::new(42).dataset(100)).gram();
    let tolerance = Tolerance::default();

    let mut group = c.benchmark_group("invert_gram");
    group.bench_function("cofactor_3x3", |b| {
        b.iter(|| black_box(invert_3x3(black_box(&gram), tolerance)))
    });
    group.bench_function("gauss_jordan", |b| {
        b.iter(|| black_box(invert(black_box(&gram), tolerance)))
    });
    group.finish();
}

fn bench_fit_groups(c: &mut Criterion) {
    let ols = OrdinaryLeastSquares::default();
    let records = SyntheticHorses::new(7).records(5_000);
    c.bench_function("partition_and_fit_groups_5000", |b| {
        b.iter(|| {
            let partition = partition_by_age(black_box(&records));
            black_box(partition.map(|p| fit_groups(&ols, &p)))
        })
    });
}

criterion_group!(
    benches,
    bench_fit,
    bench_normal_equations,
    bench_inverse,
    bench_fit_groups
);
criterion_main!(benches);
