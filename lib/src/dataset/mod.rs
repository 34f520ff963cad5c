//! Observations and datasets for the two-predictor regression.
//!
//! # Core Concepts
//!
//! - **Observation** — one horse: average stride frequency (`predictor1`),
//!   average stride length (`predictor2`), and race distance (`outcome`).
//! - **Dataset** — an ordered, validated sequence of observations. Every value
//!   is finite; order does not affect the fit but is kept stable.
//! - **HorseRecord** — a raw input row carrying the age used to split the data
//!   into [`AgeGroup`]s before fitting.
//!
//! # Example
//!
//! ```rust
//! use stride_regression::dataset::{Dataset, Observation};
//!
//! let dataset = Dataset::new(vec![
//!     Observation::new(2.30, 7.5, 8.0),
//!     Observation::new(2.41, 7.2, 7.0),
//! ])
//! .unwrap();
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.outcomes(), vec![8.0, 7.0]);
//! ```

use crate::error::RegressionError;
use crate::stats::Span;

#[cfg(feature = "csv")]
pub mod loader;
pub mod record;

#[cfg(feature = "csv")]
pub use self::loader::{from_reader, load_csv};
pub use self::record::{partition_by_age, AgeGroup, AgePartition, HorseRecord};

/// A single labeled observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub predictor1: f64,
    pub predictor2: f64,
    pub outcome: f64,
}

impl Observation {
    pub fn new(predictor1: f64, predictor2: f64, outcome: f64) -> Self {
        Self {
            predictor1,
            predictor2,
            outcome,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.predictor1.is_finite() && self.predictor2.is_finite() && self.outcome.is_finite()
    }
}

/// Ordered collection of finite observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Builds a dataset, rejecting any non-finite value.
    ///
    /// # Errors
    /// [`RegressionError::InvalidInput`] naming the first offending row.
    pub fn new(observations: Vec<Observation>) -> Result<Self, RegressionError> {
        if let Some(index) = observations.iter().position(|o| !o.is_finite()) {
            return Err(non_finite_row(index));
        }
        Ok(Self { observations })
    }

    pub fn push(&mut self, observation: Observation) -> Result<(), RegressionError> {
        if !observation.is_finite() {
            return Err(non_finite_row(self.observations.len()));
        }
        self.observations.push(observation);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn predictor1(&self) -> Vec<f64> {
        self.iter().map(|o| o.predictor1).collect()
    }

    pub fn predictor2(&self) -> Vec<f64> {
        self.iter().map(|o| o.predictor2).collect()
    }

    pub fn outcomes(&self) -> Vec<f64> {
        self.iter().map(|o| o.outcome).collect()
    }

    /// Min/max of each predictor, `None` for an empty dataset.
    pub fn training_range(&self) -> Option<TrainingRange> {
        Some(TrainingRange {
            predictor1: Span::of(&self.predictor1())?,
            predictor2: Span::of(&self.predictor2())?,
        })
    }
}

fn non_finite_row(index: usize) -> RegressionError {
    RegressionError::InvalidInput(format!("observation {index} contains a non-finite value"))
}

impl TryFrom<Vec<Observation>> for Dataset {
    type Error = RegressionError;

    fn try_from(observations: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::new(observations)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Predictor values covered by the data a model was fitted on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrainingRange {
    pub predictor1: Span,
    pub predictor2: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_rejects_nan() {
        let err = Dataset::new(vec![
            Observation::new(2.3, 7.5, 8.0),
            Observation::new(f64::NAN, 7.5, 8.0),
        ])
        .unwrap_err();
        match err {
            RegressionError::InvalidInput(msg) => assert!(msg.contains("observation 1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dataset_rejects_infinite_outcome() {
        assert!(Dataset::new(vec![Observation::new(2.3, 7.5, f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_push_validates() {
        let mut ds = Dataset::default();
        ds.push(Observation::new(2.3, 7.5, 8.0)).unwrap();
        assert!(ds.push(Observation::new(2.3, f64::NEG_INFINITY, 8.0)).is_err());
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let obs = Observation::new(2.3, 7.5, 8.0);
        let ds = Dataset::new(vec![obs, obs, obs]).unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_column_accessors_preserve_order() {
        let ds = Dataset::new(vec![
            Observation::new(1.0, 10.0, 100.0),
            Observation::new(2.0, 20.0, 200.0),
        ])
        .unwrap();
        assert_eq!(ds.predictor1(), vec![1.0, 2.0]);
        assert_eq!(ds.predictor2(), vec![10.0, 20.0]);
        assert_eq!(ds.outcomes(), vec![100.0, 200.0]);
    }

    #[test]
    fn test_training_range() {
        assert_eq!(Dataset::default().training_range(), None);
        let ds = Dataset::new(vec![
            Observation::new(2.4, 7.1, 8.0),
            Observation::new(2.2, 7.9, 9.0),
        ])
        .unwrap();
        let range = ds.training_range().unwrap();
        assert_eq!(range.predictor1, Span { min: 2.2, max: 2.4 });
        assert_eq!(range.predictor2, Span { min: 7.1, max: 7.9 });
    }
}
