//! Inference on a [`FittedModel`].

use super::{FittedModel, InferenceModel};
use crate::dataset::{Dataset, TrainingRange};
use crate::error::RegressionError;

/// Which predictors of a query fall outside the training range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Extrapolation {
    pub predictor1: bool,
    pub predictor2: bool,
}

impl Extrapolation {
    pub fn check(range: &TrainingRange, predictor1: f64, predictor2: f64) -> Self {
        Self {
            predictor1: !range.predictor1.contains(predictor1),
            predictor2: !range.predictor2.contains(predictor2),
        }
    }

    pub fn any(&self) -> bool {
        self.predictor1 || self.predictor2
    }
}

/// A predicted outcome together with its extrapolation flags.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Prediction {
    pub value: f64,
    pub extrapolation: Extrapolation,
}

fn ensure_finite(predictor1: f64, predictor2: f64) -> Result<(), RegressionError> {
    if predictor1.is_finite() && predictor2.is_finite() {
        Ok(())
    } else {
        Err(RegressionError::InvalidInput(format!(
            "predictors must be finite, got ({predictor1}, {predictor2})"
        )))
    }
}

impl FittedModel {
    /// Predicted outcome `c0 + c1·predictor1 + c2·predictor2`.
    ///
    /// Inputs outside the training range are accepted; see
    /// [`predict_with_range`](Self::predict_with_range) to detect them.
    ///
    /// # Errors
    /// [`RegressionError::InvalidInput`] if either predictor is NaN or infinite.
    pub fn predict(&self, predictor1: f64, predictor2: f64) -> Result<f64, RegressionError> {
        ensure_finite(predictor1, predictor2)?;
        Ok(self.evaluate(predictor1, predictor2))
    }

    pub fn predict_with_range(
        &self,
        predictor1: f64,
        predictor2: f64,
    ) -> Result<Prediction, RegressionError> {
        let value = self.predict(predictor1, predictor2)?;
        let extrapolation = Extrapolation::check(&self.training_range, predictor1, predictor2);
        if extrapolation.any() {
            log::debug!(
                "prediction for ({predictor1}, {predictor2}) extrapolates beyond the training range"
            );
        }
        Ok(Prediction {
            value,
            extrapolation,
        })
    }

    /// Predictions for every observation of `dataset`, in order. Outcomes are ignored.
    pub fn predict_batch(&self, dataset: &Dataset) -> Vec<f64> {
        dataset
            .iter()
            .map(|o| self.evaluate(o.predictor1, o.predictor2))
            .collect()
    }
}

/// Single input is a `[predictor1, predictor2]` pair; batch input is a [`Dataset`].
impl InferenceModel for FittedModel {
    type InputSingle = [f64; 2];
    type OutputSingle = Result<f64, RegressionError>;
    type InputBatch = Dataset;
    type OutputBatch = Vec<f64>;

    fn predict(&self, input: &[f64; 2]) -> Self::OutputSingle {
        FittedModel::predict(self, input[0], input[1])
    }

    fn predict_batch(&self, input: &Dataset) -> Vec<f64> {
        FittedModel::predict_batch(self, input)
    }
}
