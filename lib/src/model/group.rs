//! One independent fit per age group.

use super::{FittedModel, Regressor};
use crate::dataset::{AgeGroup, AgePartition};
use crate::error::RegressionError;

/// Fit outcome for each [`AgeGroup`]. A failure in one group does not affect
/// the other.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupModels {
    pub three_year_olds: Result<FittedModel, RegressionError>,
    pub four_plus: Result<FittedModel, RegressionError>,
}

impl GroupModels {
    pub fn get(&self, group: AgeGroup) -> &Result<FittedModel, RegressionError> {
        match group {
            AgeGroup::ThreeYearOld => &self.three_year_olds,
            AgeGroup::FourPlus => &self.four_plus,
        }
    }

    /// Group whose model predicts for a horse of `age`: age 3 uses the
    /// 3-year-old model, every other age the 4+ model.
    pub fn group_for_age(age: u32) -> AgeGroup {
        if age == 3 {
            AgeGroup::ThreeYearOld
        } else {
            AgeGroup::FourPlus
        }
    }

    /// Model used to predict for a horse of `age`, see [`Self::group_for_age`].
    pub fn for_age(&self, age: u32) -> &Result<FittedModel, RegressionError> {
        self.get(Self::group_for_age(age))
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgeGroup, &Result<FittedModel, RegressionError>)> {
        AgeGroup::ALL.into_iter().map(move |group| (group, self.get(group)))
    }
}

/// Fits `regressor` once per group of `partition`.
///
/// # Arguments
/// * `regressor` — estimator applied to both groups with the same options
/// * `partition` — output of [`partition_by_age`](crate::dataset::partition_by_age)
///
/// # Returns
/// One result per group. A failed group never aborts the other fit.
pub fn fit_groups<R>(regressor: &R, partition: &AgePartition) -> GroupModels
where
    R: Regressor<Fitted = FittedModel>,
{
    let fit = |group: AgeGroup| {
        let result = regressor.fit(partition.get(group));
        match &result {
            Ok(model) => log::info!(
                "fitted {group} model on {} observations",
                model.sample_size
            ),
            Err(err) => log::info!("{group} model unavailable: {err}"),
        }
        result
    };
    GroupModels {
        three_year_olds: fit(AgeGroup::ThreeYearOld),
        four_plus: fit(AgeGroup::FourPlus),
    }
}
