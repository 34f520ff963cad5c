//! # stride-regression
//!
//! Closed-form two-predictor linear regression relating a horse's average
//! stride frequency and stride length to race distance, fitted separately for
//! 3-year-olds and for horses aged 4 and up.
//!
//! ## Core Design Principles
//!
//! - **Fit/Inference Separation**: the estimator ([`OrdinaryLeastSquares`])
//!   only carries options; a successful fit returns an immutable
//!   [`FittedModel`], which is the only type that can predict.
//! - **Explicit Outcomes**: too little data, a singular design matrix and
//!   non-finite input are [`RegressionError`] values. Undefined correlations
//!   and R² are [`Diagnostic::Undefined`] values, never NaN.
//! - **Deterministic Numerics**: normal equations plus a 3×3 adjugate
//!   inverse in `f64`, with a scale-aware singularity tolerance.
//!
//! ## Quick Start
//!
//! ```rust
//! use stride_regression::dataset::{from_reader, partition_by_age, AgeGroup};
//! use stride_regression::model::{fit_groups, OrdinaryLeastSquares};
//!
//! let mut csv = String::from("age,sps_avg,sl_avg,distance\n");
//! for i in 0..12 {
//!     let sps = 2.10 + 0.03 * i as f64;
//!     let sl = 7.0 + 0.1 * ((i * 5) % 7) as f64;
//!     csv += &format!("4,{sps},{sl},{}\n", 1.0 + 2.0 * sps + 0.5 * sl);
//! }
//!
//! let records = from_reader(csv.as_bytes()).unwrap();
//! let partition = partition_by_age(&records).unwrap();
//! let models = fit_groups(&OrdinaryLeastSquares::default(), &partition);
//!
//! // no 3-year-olds in the data
//! assert!(models.get(AgeGroup::ThreeYearOld).is_err());
//!
//! let model = models.for_age(4).as_ref().unwrap();
//! let distance = model.predict(2.30, 7.5).unwrap();
//! assert!((distance - 9.35).abs() < 1e-6);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset` — observations, validated datasets, CSV loading and the age split
//! - `model` — the least-squares estimator, fitted models and per-group fitting
//! - `linalg` — small dense matrix with 3×3 cofactor and Gauss–Jordan inverses
//! - `stats` — means, Pearson correlation, R² and value spans
//! - `error` — error types

/// Observations, datasets and horse record loading.
pub mod dataset;

/// Error types returned by fitting, prediction and loading.
pub mod error;

/// Dense matrices and inversion with singularity checks.
pub mod linalg;

/// Regression estimator and fitted models.
pub mod model;

/// Descriptive statistics and fit diagnostics.
pub mod stats;

pub use dataset::{Dataset, Observation};
pub use error::RegressionError;
pub use model::{
    FitOptions, FittedModel, InferenceModel, OrdinaryLeastSquares, Prediction, Regressor,
};
pub use stats::Diagnostic;

/// Fits a model with the default [`FitOptions`].
pub fn fit(dataset: &Dataset) -> Result<FittedModel, RegressionError> {
    OrdinaryLeastSquares::default().fit(dataset)
}

/// Predicted outcome of `model` for the given predictors.
pub fn predict(
    model: &FittedModel,
    predictor1: f64,
    predictor2: f64,
) -> Result<f64, RegressionError> {
    model.predict(predictor1, predictor2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{partition_by_age, AgeGroup, HorseRecord};
    use crate::model::fit_groups;

    // Deterministic pseudo-measurements in realistic ranges.
    fn horses(age: u32, count: usize, coefficients: [f64; 3]) -> Vec<HorseRecord> {
        (0..count)
            .map(|i| {
                let sps_avg = 2.05 + 0.04 * ((i * 3) % 11) as f64;
                let sl_avg = 6.9 + 0.12 * ((i * 7) % 9) as f64;
                let [c0, c1, c2] = coefficients;
                HorseRecord {
                    age,
                    sps_avg,
                    sl_avg,
                    distance: c0 + c1 * sps_avg + c2 * sl_avg,
                }
            })
            .collect()
    }

    #[test]
    fn test_fit_and_predict_entry_points() {
        let records = horses(4, 15, [-20.0, 6.0, 2.5]);
        let dataset = Dataset::new(records.iter().map(HorseRecord::observation).collect()).unwrap();
        let model = fit(&dataset).unwrap();

        let expected = -20.0 + 6.0 * 2.3 + 2.5 * 7.5;
        assert!((predict(&model, 2.3, 7.5).unwrap() - expected).abs() < 1e-6);
        assert!((model.r_squared.value().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_age_groups_get_separate_models() {
        let mut records = horses(3, 12, [1.0, 2.0, 0.5]);
        records.extend(horses(6, 14, [4.0, -1.0, 1.0]));
        records.push(HorseRecord {
            age: 2,
            sps_avg: 2.4,
            sl_avg: 7.1,
            distance: 5.0,
        });

        let partition = partition_by_age(&records).unwrap();
        assert_eq!(partition.skipped, 1);
        let models = fit_groups(&OrdinaryLeastSquares::default(), &partition);

        let young = models.get(AgeGroup::ThreeYearOld).as_ref().unwrap();
        let old = models.get(AgeGroup::FourPlus).as_ref().unwrap();
        assert_eq!(young.sample_size, 12);
        assert_eq!(old.sample_size, 14);
        assert!((young.coefficients[1] - 2.0).abs() < 1e-6);
        assert!((old.coefficients[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fitting_does_not_touch_dataset() {
        let records = horses(5, 10, [0.0, 1.0, 1.0]);
        let dataset = Dataset::new(records.iter().map(HorseRecord::observation).collect()).unwrap();
        let before = dataset.clone();
        let _ = fit(&dataset).unwrap();
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dataset>();
        assert_send_sync::<FittedModel>();
        assert_send_sync::<OrdinaryLeastSquares>();
    }
}
