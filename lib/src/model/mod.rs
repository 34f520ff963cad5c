//! Regression models with a strict split between fitting and inference.
//!
//! - An estimator ([`OrdinaryLeastSquares`]) only holds fitting options and
//!   implements [`Regressor`].
//! - A successful fit yields a [`FittedModel`], which holds only the learned
//!   coefficients plus diagnostics and implements [`InferenceModel`].
//!
//! Prediction is only reachable through a `FittedModel`, so predicting
//! without a successful fit cannot be expressed.

use crate::dataset::Dataset;
use crate::error::RegressionError;

pub mod group;
pub mod linear;
pub mod predict;

pub use group::{fit_groups, GroupModels};
pub use linear::{FitOptions, FittedModel, NormalEquations, OlsBuilder, OrdinaryLeastSquares};
pub use predict::{Extrapolation, Prediction};

/// An estimator that turns a dataset into a fitted model.
pub trait Regressor {
    type Fitted;

    /// Fits a fresh model on an immutable snapshot of `dataset`.
    fn fit(&self, dataset: &Dataset) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted model that maps predictor values to an outcome.
pub trait InferenceModel {
    type InputSingle: ?Sized;
    type OutputSingle;
    type InputBatch: ?Sized;
    type OutputBatch;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle;

    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch;
}
