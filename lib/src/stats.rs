//! Descriptive statistics used by the regression engine: means, Pearson
//! correlation, the coefficient of determination, and value spans.
//!
//! Correlation and R² are returned as [`Diagnostic`] values so that a
//! mathematically undefined result (zero variance) is represented explicitly
//! instead of being coerced into `0.0`, `1.0`, or NaN.

use std::fmt;

/// Why a diagnostic could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UndefinedReason {
    /// The predictor takes a single value across the dataset.
    ZeroPredictorVariance,
    /// The outcome takes a single value across the dataset.
    ZeroOutcomeVariance,
    /// A sum of squares exceeded the range of `f64`.
    Overflow,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::ZeroPredictorVariance => write!(f, "predictor has zero variance"),
            UndefinedReason::ZeroOutcomeVariance => write!(f, "outcome has zero variance"),
            UndefinedReason::Overflow => write!(f, "sums of squares overflow f64"),
        }
    }
}

/// A goodness-of-fit or association statistic that may be undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "status", content = "value", rename_all = "snake_case")
)]
pub enum Diagnostic {
    Defined(f64),
    Undefined(UndefinedReason),
}

impl Diagnostic {
    pub fn value(&self) -> Option<f64> {
        match self {
            Diagnostic::Defined(v) => Some(*v),
            Diagnostic::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Diagnostic::Defined(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Defined(v) => match f.precision() {
                Some(p) => write!(f, "{v:.p$}"),
                None => write!(f, "{v}"),
            },
            Diagnostic::Undefined(reason) => write!(f, "undefined ({reason})"),
        }
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Whether every value equals the first one.
///
/// Used instead of testing a variance against zero: the mean of a constant
/// sequence such as `[2.3; 3]` need not round back to `2.3`, which would leave
/// a spurious non-zero variance.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Sum of squared deviations from `center`.
pub fn sum_of_squares(values: &[f64], center: f64) -> f64 {
    values.iter().map(|v| (v - center).powi(2)).sum()
}

/// Pearson correlation coefficient of `x` against `y`.
///
/// `x` is treated as the predictor and `y` as the outcome when reporting
/// which side had zero variance. The result is clamped to `[-1, 1]` to absorb
/// rounding at perfect (anti-)correlation.
///
/// ```rust
/// use stride_regression::stats::{pearson, Diagnostic};
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
/// assert!((r.value().unwrap() - 1.0).abs() < 1e-12);
///
/// let undefined = pearson(&[2.3, 2.3, 2.3], &[6.0, 7.0, 8.0]);
/// assert!(matches!(undefined, Diagnostic::Undefined(_)));
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Diagnostic {
    debug_assert_eq!(x.len(), y.len(), "x and y must have the same length");
    let (Some(mean_x), Some(mean_y)) = (mean(x), mean(y)) else {
        return Diagnostic::Undefined(UndefinedReason::ZeroPredictorVariance);
    };

    let (covariance, var_x, var_y) =
        x.iter()
            .zip(y)
            .fold((0.0, 0.0, 0.0), |(cov, vx, vy), (&xi, &yi)| {
                let dx = xi - mean_x;
                let dy = yi - mean_y;
                (cov + dx * dy, vx + dx * dx, vy + dy * dy)
            });

    if is_constant(x) || var_x == 0.0 {
        return Diagnostic::Undefined(UndefinedReason::ZeroPredictorVariance);
    }
    if is_constant(y) || var_y == 0.0 {
        return Diagnostic::Undefined(UndefinedReason::ZeroOutcomeVariance);
    }

    if !(covariance.is_finite() && var_x.is_finite() && var_y.is_finite()) {
        return Diagnostic::Undefined(UndefinedReason::Overflow);
    }
    let r = covariance / (var_x.sqrt() * var_y.sqrt());
    Diagnostic::Defined(r.clamp(-1.0, 1.0))
}

/// Coefficient of determination `1 - ssRes / ssTot`.
///
/// Undefined when the actual values are constant (`ssTot == 0`), or when
/// either sum of squares is not finite.
pub fn r_squared(actual: &[f64], fitted: &[f64]) -> Diagnostic {
    debug_assert_eq!(actual.len(), fitted.len(), "actual and fitted must have the same length");
    let Some(mean_actual) = mean(actual) else {
        return Diagnostic::Undefined(UndefinedReason::ZeroOutcomeVariance);
    };

    let ss_tot = sum_of_squares(actual, mean_actual);
    if is_constant(actual) || ss_tot == 0.0 {
        return Diagnostic::Undefined(UndefinedReason::ZeroOutcomeVariance);
    }

    let ss_res: f64 = actual
        .iter()
        .zip(fitted)
        .map(|(a, f)| (a - f).powi(2))
        .sum();
    if !ss_tot.is_finite() || !ss_res.is_finite() {
        return Diagnostic::Undefined(UndefinedReason::Overflow);
    }

    Diagnostic::Defined(1.0 - ss_res / ss_tot)
}

/// Closed interval `[min, max]` covered by a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    /// Span of `values`, `None` if empty.
    pub fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        Some(values.iter().skip(1).fold(
            Span {
                min: first,
                max: first,
            },
            |span, &v| Span {
                min: span.min.min(v),
                max: span.max.max(v),
            },
        ))
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}
