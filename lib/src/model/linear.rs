//! Closed-form ordinary least squares with two predictors and an intercept.
//!
//! The model is `outcome = c0 + c1·predictor1 + c2·predictor2`. Fitting solves
//! the normal equations `XᵗX · c = Xᵗy` by inverting the 3×3 Gram matrix, so
//! there is no learning rate, no iteration and no randomness: fitting the same
//! dataset twice gives bit-identical coefficients.
//!
//! With a relative tolerance the Gram matrix is first equilibrated by the
//! square roots of its diagonal, so the singularity verdict does not depend
//! on the units either predictor is measured in.
//!
//! ```rust
//! use stride_regression::dataset::{Dataset, Observation};
//! use stride_regression::model::{OrdinaryLeastSquares, Regressor};
//!
//! let p2 = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0, 5.0, 8.0];
//! let observations = (0..12)
//!     .map(|i| {
//!         let p1 = (i + 1) as f64;
//!         Observation::new(p1, p2[i], 5.0 + 2.0 * p1 - 3.0 * p2[i])
//!     })
//!     .collect();
//! let dataset = Dataset::new(observations).unwrap();
//!
//! let model = OrdinaryLeastSquares::default().fit(&dataset).unwrap();
//! assert!((model.coefficients[1] - 2.0).abs() < 1e-6);
//! ```

use super::Regressor;
use crate::dataset::{Dataset, TrainingRange};
use crate::error::RegressionError;
use crate::linalg::{determinant_3x3, invert_3x3, Matrix, Tolerance, ToleranceMode};
use crate::stats::{self, Diagnostic};

/// Options controlling a fit.
///
/// Defaults:
/// - `min_samples`: 10
/// - `tolerance`: relative, `1e-12`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitOptions {
    /// Smallest dataset accepted by [`Regressor::fit`].
    pub min_samples: usize,
    /// Singularity threshold for the Gram matrix determinant.
    pub tolerance: Tolerance,
}

impl FitOptions {
    pub const DEFAULT_MIN_SAMPLES: usize = 10;
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_samples: Self::DEFAULT_MIN_SAMPLES,
            tolerance: Tolerance::default(),
        }
    }
}

/// Fluent builder for [`OrdinaryLeastSquares`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OlsBuilder {
    options: FitOptions,
}

impl OlsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_samples(mut self, min_samples: usize) -> Self {
        self.options.min_samples = min_samples;
        self
    }

    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.options.tolerance = tolerance;
        self
    }

    pub fn build(self) -> OrdinaryLeastSquares {
        OrdinaryLeastSquares::new(self.options)
    }
}

/// The regression estimator. Holds options only; every call to
/// [`fit`](Regressor::fit) produces an independent [`FittedModel`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrdinaryLeastSquares {
    options: FitOptions,
}

impl OrdinaryLeastSquares {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// Equivalent to `OlsBuilder::new()`.
    pub fn builder() -> OlsBuilder {
        OlsBuilder::new()
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Solves `XᵗX · c = Xᵗy`.
    ///
    /// Relative mode solves the equilibrated system
    /// `(D⁻¹XᵗXD⁻¹)(Dc) = D⁻¹Xᵗy` and reports the determinant of the scaled
    /// matrix on failure. Absolute mode inverts `XᵗX` as-is.
    fn solve(&self, equations: &NormalEquations) -> Result<[f64; 3], RegressionError> {
        let tolerance = self.options.tolerance;
        let moments = equations.moments();
        let solution: Vec<f64> = match tolerance.mode {
            ToleranceMode::Absolute => invert_3x3(&equations.gram(), tolerance)?.matvec(&moments)?,
            ToleranceMode::Relative => {
                let scales = equations.column_scales();
                let scaled_moments: Vec<f64> =
                    moments.iter().zip(&scales).map(|(m, s)| m / s).collect();
                invert_3x3(&equations.scaled_gram(&scales), tolerance)?
                    .matvec(&scaled_moments)?
                    .into_iter()
                    .zip(scales)
                    .map(|(c, s)| c / s)
                    .collect()
            }
        };
        Ok([solution[0], solution[1], solution[2]])
    }
}

/// The nine running sums that make up the normal equations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalEquations {
    pub n: f64,
    pub sum_x1: f64,
    pub sum_x2: f64,
    pub sum_x1x1: f64,
    pub sum_x1x2: f64,
    pub sum_x2x2: f64,
    pub sum_y: f64,
    pub sum_x1y: f64,
    pub sum_x2y: f64,
}

impl NormalEquations {
    /// Accumulates the sums in a single pass over `dataset`.
    pub fn accumulate(dataset: &Dataset) -> Self {
        dataset.iter().fold(Self::default(), |acc, o| {
            let (x1, x2, y) = (o.predictor1, o.predictor2, o.outcome);
            Self {
                n: acc.n + 1.0,
                sum_x1: acc.sum_x1 + x1,
                sum_x2: acc.sum_x2 + x2,
                sum_x1x1: acc.sum_x1x1 + x1 * x1,
                sum_x1x2: acc.sum_x1x2 + x1 * x2,
                sum_x2x2: acc.sum_x2x2 + x2 * x2,
                sum_y: acc.sum_y + y,
                sum_x1y: acc.sum_x1y + x1 * y,
                sum_x2y: acc.sum_x2y + x2 * y,
            }
        })
    }

    /// The symmetric Gram matrix `XᵗX` for the design `[1, x1, x2]`.
    pub fn gram(&self) -> Matrix {
        Matrix::from_rows(&[
            [self.n, self.sum_x1, self.sum_x2],
            [self.sum_x1, self.sum_x1x1, self.sum_x1x2],
            [self.sum_x2, self.sum_x1x2, self.sum_x2x2],
        ])
    }

    /// The moment vector `Xᵗy`.
    pub fn moments(&self) -> [f64; 3] {
        [self.sum_y, self.sum_x1y, self.sum_x2y]
    }

    pub fn is_finite(&self) -> bool {
        [
            self.n,
            self.sum_x1,
            self.sum_x2,
            self.sum_x1x1,
            self.sum_x1x2,
            self.sum_x2x2,
            self.sum_y,
            self.sum_x1y,
            self.sum_x2y,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// `sqrt` of each Gram diagonal entry; an all-zero column keeps `1.0`.
    pub fn column_scales(&self) -> [f64; 3] {
        [self.n, self.sum_x1x1, self.sum_x2x2].map(|d| if d > 0.0 { d.sqrt() } else { 1.0 })
    }

    /// `D⁻¹ XᵗX D⁻¹` for `D = diag(scales)`. Off-diagonal entries of the
    /// result lie in `[-1, 1]`.
    pub fn scaled_gram(&self, scales: &[f64; 3]) -> Matrix {
        let gram = self.gram();
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = gram[(i, j)] / scales[i] / scales[j];
            }
        }
        Matrix::from_rows(&rows)
    }
}

/// Result of a successful fit. Immutable; only exposes inference.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FittedModel {
    /// `[intercept, predictor1 weight, predictor2 weight]`
    pub coefficients: [f64; 3],
    /// Pearson correlation of predictor1 with the outcome.
    pub correlation1: Diagnostic,
    /// Pearson correlation of predictor2 with the outcome.
    pub correlation2: Diagnostic,
    pub r_squared: Diagnostic,
    pub sample_size: usize,
    pub training_range: TrainingRange,
}

impl FittedModel {
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// `c0 + c1·p1 + c2·p2` without input validation.
    pub(crate) fn evaluate(&self, predictor1: f64, predictor2: f64) -> f64 {
        let [c0, c1, c2] = self.coefficients;
        c0 + c1 * predictor1 + c2 * predictor2
    }
}

impl Regressor for OrdinaryLeastSquares {
    type Fitted = FittedModel;

    fn fit(&self, dataset: &Dataset) -> Result<FittedModel, RegressionError> {
        let n = dataset.len();
        if n < self.options.min_samples {
            return Err(RegressionError::InsufficientData {
                needed: self.options.min_samples,
                got: n,
            });
        }
        let training_range = dataset
            .training_range()
            .ok_or_else(|| RegressionError::InvalidInput("dataset is empty".to_string()))?;

        let x1 = dataset.predictor1();
        let x2 = dataset.predictor2();
        let y = dataset.outcomes();

        let correlation1 = stats::pearson(&x1, &y);
        let correlation2 = stats::pearson(&x2, &y);
        for (name, diagnostic) in [("predictor1", &correlation1), ("predictor2", &correlation2)] {
            if let Diagnostic::Undefined(reason) = diagnostic {
                log::warn!("correlation of {name} with outcome is undefined: {reason}");
            }
        }

        let equations = NormalEquations::accumulate(dataset);
        if !equations.is_finite() {
            return Err(RegressionError::InvalidInput(
                "normal equation sums overflow f64".to_string(),
            ));
        }
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("normal equations over {n} observations: {equations:?}");
            log::debug!("det(XtX) = {:e}", determinant_3x3(&equations.gram())?);
        }

        let coefficients = self.solve(&equations)?;
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(RegressionError::InvalidInput(format!(
                "fit produced non-finite coefficients {coefficients:?}"
            )));
        }

        let [c0, c1, c2] = coefficients;
        let fitted: Vec<f64> = x1
            .iter()
            .zip(&x2)
            .map(|(a, b)| c0 + c1 * a + c2 * b)
            .collect();
        let r_squared = stats::r_squared(&y, &fitted);
        if !r_squared.is_defined() {
            log::warn!("R² is undefined: outcome has zero variance");
        }
        log::debug!("fitted coefficients {coefficients:?}, R² {r_squared}");

        Ok(FittedModel {
            coefficients,
            correlation1,
            correlation2,
            r_squared,
            sample_size: n,
            training_range,
        })
    }
}
