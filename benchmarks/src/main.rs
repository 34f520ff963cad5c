// Quick timing and accuracy report for the closed-form fit.
// For statistically sound numbers use `cargo bench --package benchmarks`.

use benchmarks::{benchmark_with_warmup, RegressionMetrics, SyntheticHorses};
use stride_regression::dataset::partition_by_age;
use stride_regression::model::fit_groups;
use stride_regression::{OrdinaryLeastSquares, Regressor};

const SIZES: [usize; 4] = [10, 100, 1_000, 10_000];

fn main() {
    println!("stride-regression benchmark report");
    println!();
    println!(
        "{:>8} {:>12} {:>12} {:>12} {:>10} {:>8}",
        "n", "mean (us)", "p95 (us)", "std (us)", "RMSE", "R²"
    );

    let ols = OrdinaryLeastSquares::default();
    for n in SIZES {
        let mut generator = SyntheticHorses::new(42);
        let train = generator.dataset(n);
        let test = generator.dataset(1_000);

        let (model, stats) = benchmark_with_warmup(5, 50, || ols.fit(&train));
        match model {
            Some(Ok(model)) => {
                let metrics = RegressionMetrics::evaluate(&model, &test);
                let r_squared = format!("{:.4}", metrics.r_squared);
                println!(
                    "{:>8} {:>12.2} {:>12.2} {:>12.2} {:>10.4} {:>8}",
                    n, stats.mean_us, stats.p95_us, stats.std_dev_us, metrics.rmse, r_squared
                );
            }
            Some(Err(err)) => println!("{n:>8} fit failed: {err}"),
            None => println!("{n:>8} no iterations run"),
        }
    }

    println!();
    let records = SyntheticHorses::new(7).records(5_000);
    let (models, stats) = benchmark_with_warmup(2, 20, || {
        partition_by_age(&records).map(|partition| fit_groups(&ols, &partition))
    });
    println!(
        "partition + fit both groups, 5000 records: mean {:.2} us, p95 {:.2} us",
        stats.mean_us, stats.p95_us
    );
    if let Some(Ok(models)) = models {
        for (group, result) in models.iter() {
            match result {
                Ok(model) => println!(
                    "  {group}: n = {}, R² = {:.4}",
                    model.sample_size, model.r_squared
                ),
                Err(err) => println!("  {group}: {err}"),
            }
        }
    }
}
