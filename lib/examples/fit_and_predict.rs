//! End-to-end example: stride measurements to race distance.
//!
//! Builds a small CSV of horse records in memory, splits it by age, fits one
//! model per group and predicts the distance for a 3-year-old.
//!
//! Run with: cargo run --example fit_and_predict

use std::error::Error;
use stride_regression::dataset::{from_reader, partition_by_age, AgeGroup};
use stride_regression::model::{fit_groups, OrdinaryLeastSquares};

fn synthetic_csv() -> String {
    let mut csv = String::from("age,sps_avg,sl_avg,distance\n");
    for i in 0..30 {
        let age = if i % 2 == 0 { 3 } else { 4 + i % 3 };
        let sps = 2.05 + 0.02 * ((i * 7) % 19) as f64;
        let sl = 6.8 + 0.09 * ((i * 5) % 13) as f64;
        // younger horses run shorter for the same stride profile
        let base = if age == 3 { -14.0 } else { -12.5 };
        let jitter = 0.05 * (((i * 11) % 7) as f64 - 3.0);
        let distance = base + 4.2 * sps + 1.6 * sl + jitter;
        csv += &format!("{age},{sps:.3},{sl:.3},{distance:.2}\n");
    }
    csv
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Stride Regression ===\n");

    let records = from_reader(synthetic_csv().as_bytes())?;
    let partition = partition_by_age(&records)?;
    let models = fit_groups(&OrdinaryLeastSquares::default(), &partition);

    for (group, result) in models.iter() {
        match result {
            Ok(model) => {
                let [c0, c1, c2] = model.coefficients;
                println!("{group}");
                println!("  distance = {c0:.3} + {c1:.3}·sps + {c2:.3}·sl");
                println!("  R² = {:.3}, n = {}", model.r_squared, model.sample_size);
                println!(
                    "  r(sps) = {:.3}, r(sl) = {:.3}",
                    model.correlation1, model.correlation2
                );
            }
            Err(err) => println!("{group}: {err}"),
        }
    }

    let model = models
        .get(AgeGroup::ThreeYearOld)
        .as_ref()
        .map_err(|e| e.clone())?;
    let prediction = model.predict_with_range(2.30, 7.5)?;
    println!(
        "\n3-year-old at 2.30 Hz / 7.5 m: {:.1}f{}",
        prediction.value,
        if prediction.extrapolation.any() {
            " (outside training range)"
        } else {
            ""
        }
    );

    Ok(())
}
