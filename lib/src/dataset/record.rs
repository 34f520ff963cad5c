//! Raw horse records and the age split applied before fitting.

use super::{Dataset, Observation};
use crate::error::RegressionError;
use std::fmt;

/// One input row: the horse's age plus its stride measurements and race distance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorseRecord {
    pub age: u32,
    /// Average strides per second (Hz).
    pub sps_avg: f64,
    /// Average stride length (metres).
    pub sl_avg: f64,
    /// Race distance (furlongs).
    pub distance: f64,
}

impl HorseRecord {
    pub fn observation(&self) -> Observation {
        Observation::new(self.sps_avg, self.sl_avg, self.distance)
    }
}

/// The two subpopulations a separate model is fitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgeGroup {
    /// `age == 3`
    ThreeYearOld,
    /// `age >= 4`
    FourPlus,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 2] = [AgeGroup::ThreeYearOld, AgeGroup::FourPlus];

    /// Group for an age, `None` for horses younger than three.
    pub fn from_age(age: u32) -> Option<Self> {
        match age {
            3 => Some(AgeGroup::ThreeYearOld),
            a if a >= 4 => Some(AgeGroup::FourPlus),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::ThreeYearOld => "3-Year-Olds",
            AgeGroup::FourPlus => "4+ Year-Olds",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Records split into one dataset per [`AgeGroup`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgePartition {
    pub three_year_olds: Dataset,
    pub four_plus: Dataset,
    /// Records younger than three, which belong to neither group.
    pub skipped: usize,
}

impl AgePartition {
    pub fn get(&self, group: AgeGroup) -> &Dataset {
        match group {
            AgeGroup::ThreeYearOld => &self.three_year_olds,
            AgeGroup::FourPlus => &self.four_plus,
        }
    }
}

/// Splits records into the 3-year-old and 4+ datasets, preserving input order.
///
/// ```rust
/// use stride_regression::dataset::{partition_by_age, HorseRecord};
///
/// let records = [
///     HorseRecord { age: 3, sps_avg: 2.3, sl_avg: 7.5, distance: 8.0 },
///     HorseRecord { age: 5, sps_avg: 2.2, sl_avg: 7.8, distance: 10.0 },
///     HorseRecord { age: 4, sps_avg: 2.4, sl_avg: 7.1, distance: 6.0 },
/// ];
/// let partition = partition_by_age(&records).unwrap();
/// assert_eq!(partition.three_year_olds.len(), 1);
/// assert_eq!(partition.four_plus.len(), 2);
/// ```
pub fn partition_by_age<'a, I>(records: I) -> Result<AgePartition, RegressionError>
where
    I: IntoIterator<Item = &'a HorseRecord>,
{
    let mut partition = AgePartition::default();
    for record in records {
        match AgeGroup::from_age(record.age) {
            Some(AgeGroup::ThreeYearOld) => partition.three_year_olds.push(record.observation())?,
            Some(AgeGroup::FourPlus) => partition.four_plus.push(record.observation())?,
            None => {
                log::warn!("skipping record with age {} (no matching age group)", record.age);
                partition.skipped += 1;
            }
        }
    }
    log::debug!(
        "partitioned records: {} three-year-olds, {} four-plus, {} skipped",
        partition.three_year_olds.len(),
        partition.four_plus.len(),
        partition.skipped
    );
    Ok(partition)
}
