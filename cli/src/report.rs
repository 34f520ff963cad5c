//! Text and JSON rendering of fitted group models and predictions.

use std::fmt;

use serde::Serialize;
use stride_regression::dataset::AgeGroup;
use stride_regression::model::{Extrapolation, GroupModels};
use stride_regression::stats::Span;
use stride_regression::{Diagnostic, FittedModel, RegressionError};

use crate::error::{CliError, CliResult};

/// `84.2%`, or `undefined`.
fn percent(diagnostic: &Diagnostic) -> String {
    match diagnostic.value() {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "undefined".to_string(),
    }
}

fn correlation(diagnostic: &Diagnostic) -> String {
    match diagnostic.value() {
        Some(v) => format!("{v:.3}"),
        None => "undefined".to_string(),
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupOutcome {
    Fitted { model: FittedModel },
    InsufficientData { needed: usize, got: usize },
    Singular { determinant: f64 },
    Invalid { message: String },
}

impl From<&Result<FittedModel, RegressionError>> for GroupOutcome {
    fn from(result: &Result<FittedModel, RegressionError>) -> Self {
        match result {
            Ok(model) => GroupOutcome::Fitted {
                model: model.clone(),
            },
            Err(RegressionError::InsufficientData { needed, got }) => {
                GroupOutcome::InsufficientData {
                    needed: *needed,
                    got: *got,
                }
            }
            Err(RegressionError::SingularMatrix { determinant }) => GroupOutcome::Singular {
                determinant: *determinant,
            },
            Err(RegressionError::InvalidInput(message)) => GroupOutcome::Invalid {
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub group: AgeGroup,
    pub label: &'static str,
    #[serde(flatten)]
    pub outcome: GroupOutcome,
}

/// Per-group diagnostics for the `stats` command.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub groups: Vec<GroupReport>,
    pub skipped: usize,
}

impl StatsReport {
    pub fn new(models: &GroupModels, skipped: usize) -> Self {
        let groups = models
            .iter()
            .map(|(group, result)| GroupReport {
                group,
                label: group.label(),
                outcome: result.into(),
            })
            .collect();
        Self { groups, skipped }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Performance Models")?;
        for report in &self.groups {
            writeln!(f)?;
            writeln!(f, "{}", report.label)?;
            match &report.outcome {
                GroupOutcome::Fitted { model } => {
                    writeln!(f, "  Model accuracy R²: {}", percent(&model.r_squared))?;
                    writeln!(f, "  Sample size: {} horses", model.sample_size)?;
                    writeln!(f, "  Correlation (SPS): {}", correlation(&model.correlation1))?;
                    writeln!(f, "  Correlation (SL): {}", correlation(&model.correlation2))?;
                }
                GroupOutcome::InsufficientData { needed, got } => {
                    writeln!(f, "  Need {needed}+ horses (have {got})")?;
                }
                GroupOutcome::Singular { .. } => {
                    writeln!(f, "  Singular design matrix")?;
                }
                GroupOutcome::Invalid { message } => {
                    writeln!(f, "  Invalid input: {message}")?;
                }
            }
        }
        if self.skipped > 0 {
            writeln!(f)?;
            writeln!(f, "{} records younger than 3 were skipped", self.skipped)?;
        }
        Ok(())
    }
}

/// Result of the `predict` command.
#[derive(Debug, Serialize)]
pub struct PredictionReport {
    pub group: AgeGroup,
    pub sps_avg: f64,
    pub sl_avg: f64,
    /// Furlongs.
    pub distance: f64,
    pub r_squared: Diagnostic,
    pub sample_size: usize,
    pub extrapolation: Extrapolation,
    #[serde(skip)]
    ranges: (Span, Span),
}

impl PredictionReport {
    /// Predicts with the 3-year-old model for age 3 and the 4+ model otherwise.
    pub fn new(models: &GroupModels, age: u32, sps_avg: f64, sl_avg: f64) -> CliResult<Self> {
        let group = GroupModels::group_for_age(age);
        let model = models
            .for_age(age)
            .as_ref()
            .map_err(|err| CliError::ModelUnavailable {
                group,
                source: err.clone(),
            })?;
        let prediction = model.predict_with_range(sps_avg, sl_avg)?;
        Ok(Self {
            group,
            sps_avg,
            sl_avg,
            distance: prediction.value,
            r_squared: model.r_squared,
            sample_size: model.sample_size,
            extrapolation: prediction.extrapolation,
            ranges: (
                model.training_range.predictor1,
                model.training_range.predictor2,
            ),
        })
    }
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted distance ({}): {:.1}f", self.group, self.distance)?;
        writeln!(
            f,
            "R²: {} | Sample size: {} horses",
            percent(&self.r_squared),
            self.sample_size
        )?;
        let (sps_range, sl_range) = &self.ranges;
        if self.extrapolation.predictor1 {
            writeln!(
                f,
                "warning: SPS {:.2} is outside the training range [{:.2}, {:.2}]",
                self.sps_avg, sps_range.min, sps_range.max
            )?;
        }
        if self.extrapolation.predictor2 {
            writeln!(
                f,
                "warning: SL {:.2} is outside the training range [{:.2}, {:.2}]",
                self.sl_avg, sl_range.min, sl_range.max
            )?;
        }
        Ok(())
    }
}
