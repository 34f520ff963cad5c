//! Held-out accuracy of a fitted model.

use stride_regression::stats::{self, Diagnostic};
use stride_regression::{Dataset, FittedModel};

/// Mean squared error. `0.0` for empty input.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len(), "Arrays must have the same length");
    if actual.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    sum_sq / actual.len() as f64
}

/// Mean absolute error. `0.0` for empty input.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len(), "Arrays must have the same length");
    if actual.is_empty() {
        return 0.0;
    }
    let sum_abs: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();
    sum_abs / actual.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r_squared: Diagnostic,
}

impl RegressionMetrics {
    pub fn calculate(actual: &[f64], predicted: &[f64]) -> Self {
        let mse = mse(actual, predicted);
        Self {
            mse,
            rmse: mse.sqrt(),
            mae: mae(actual, predicted),
            r_squared: stats::r_squared(actual, predicted),
        }
    }

    /// Scores `model` on `test`.
    pub fn evaluate(model: &FittedModel, test: &Dataset) -> Self {
        Self::calculate(&test.outcomes(), &model.predict_batch(test))
    }
}
