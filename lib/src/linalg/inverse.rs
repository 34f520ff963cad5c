//! Matrix inversion with explicit singularity checks.

use super::Matrix;
use crate::error::LinalgError;

/// How [`Tolerance::epsilon`] is compared against a determinant or pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ToleranceMode {
    /// `epsilon` is scaled by the magnitude of the matrix.
    #[default]
    Relative,
    /// `epsilon` is used as-is.
    Absolute,
}

/// Threshold below which a determinant (or pivot) counts as zero.
///
/// The relative mode compares determinants against the Hadamard bound (the
/// product of [`Matrix::row_norm`]s) and pivots against [`Matrix::max_abs`],
/// so that multiplying a matrix by a constant does not change the verdict.
/// The absolute mode reproduces a plain `|det| < epsilon` test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance {
    pub mode: ToleranceMode,
    pub epsilon: f64,
}

impl Tolerance {
    pub const DEFAULT_RELATIVE_EPSILON: f64 = 1e-12;
    pub const DEFAULT_ABSOLUTE_EPSILON: f64 = 1e-9;

    pub fn relative(epsilon: f64) -> Self {
        Self {
            mode: ToleranceMode::Relative,
            epsilon,
        }
    }

    pub fn absolute(epsilon: f64) -> Self {
        Self {
            mode: ToleranceMode::Absolute,
            epsilon,
        }
    }

    /// Effective threshold for a quantity whose natural magnitude is `scale`.
    ///
    /// # Arguments
    /// * `scale` - Magnitude the tested value is measured against, e.g. the
    ///   largest absolute entry of the matrix being factored. Ignored in
    ///   absolute mode.
    ///
    /// # Returns
    /// `epsilon * scale` in relative mode, `epsilon` in absolute mode.
    pub fn threshold(&self, scale: f64) -> f64 {
        match self.mode {
            ToleranceMode::Relative => self.epsilon * scale,
            ToleranceMode::Absolute => self.epsilon,
        }
    }

    /// Whether `value` is indistinguishable from zero at the given scale.
    ///
    /// Exact zeros and NaN are always negligible, even when the threshold
    /// itself collapses to zero.
    pub fn is_negligible(&self, value: f64, scale: f64) -> bool {
        value.is_nan() || value == 0.0 || value.abs() < self.threshold(scale)
    }

    /// Whether `det` is indistinguishable from zero for the matrix `m`.
    ///
    /// In relative mode `|det|` is divided by one row norm at a time and the
    /// quotient compared with `epsilon`; the full Hadamard bound is never
    /// formed, since it can overflow while `det` itself is finite.
    ///
    /// # Arguments
    /// * `det` - Determinant of `m`
    /// * `m` - Matrix the determinant was computed from
    ///
    /// # Returns
    /// `true` for exact zeros and NaN in either mode.
    pub fn is_negligible_determinant(&self, det: f64, m: &Matrix) -> bool {
        if det.is_nan() || det == 0.0 {
            return true;
        }
        match self.mode {
            ToleranceMode::Relative => {
                let ratio = (0..m.rows()).fold(det.abs(), |ratio, i| ratio / m.row_norm(i));
                ratio < self.epsilon
            }
            ToleranceMode::Absolute => det.abs() < self.epsilon,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::relative(Self::DEFAULT_RELATIVE_EPSILON)
    }
}

/// The two indices of `{0, 1, 2}` other than `k`, in ascending order.
fn complement(k: usize) -> (usize, usize) {
    match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Signed cofactor `C(i, j)` of a 3×3 matrix.
fn cofactor_3x3(m: &Matrix, i: usize, j: usize) -> f64 {
    let (r0, r1) = complement(i);
    let (c0, c1) = complement(j);
    let minor = m[(r0, c0)] * m[(r1, c1)] - m[(r0, c1)] * m[(r1, c0)];
    if (i + j) % 2 == 0 {
        minor
    } else {
        -minor
    }
}

fn ensure_3x3(m: &Matrix) -> Result<(), LinalgError> {
    if m.square_dim()? != 3 {
        return Err(LinalgError::DimensionMismatch {
            expected: "3x3".to_string(),
            got: format!("{}x{}", m.rows(), m.cols()),
        });
    }
    Ok(())
}

/// Determinant of a 3×3 matrix by cofactor expansion along the first row.
pub fn determinant_3x3(m: &Matrix) -> Result<f64, LinalgError> {
    ensure_3x3(m)?;
    Ok((0..3).map(|j| m[(0, j)] * cofactor_3x3(m, 0, j)).sum())
}

/// Inverts a 3×3 matrix through its adjugate: `A⁻¹ = adj(A) / det(A)`.
///
/// # Errors
/// - [`LinalgError::Singular`] when the determinant is negligible under `tolerance`
/// - [`LinalgError::Overflow`] when the determinant is infinite
/// - [`LinalgError::DimensionMismatch`] / [`LinalgError::NotSquare`] for non-3×3 input
///
/// ```rust
/// use stride_regression::linalg::{invert_3x3, Matrix, Tolerance};
///
/// let a = Matrix::from_rows(&[[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 8.0]]);
/// let inv = invert_3x3(&a, Tolerance::default()).unwrap();
/// assert_eq!(inv[(1, 1)], 0.25);
/// ```
pub fn invert_3x3(m: &Matrix, tolerance: Tolerance) -> Result<Matrix, LinalgError> {
    let det = determinant_3x3(m)?;
    if tolerance.is_negligible_determinant(det, m) {
        return Err(LinalgError::Singular { determinant: det });
    }
    if det.is_infinite() {
        return Err(LinalgError::Overflow);
    }

    let mut inv = Matrix::zeros(3, 3);
    for i in 0..3 {
        for j in 0..3 {
            // adjugate is the transposed cofactor matrix
            inv[(i, j)] = cofactor_3x3(m, j, i) / det;
        }
    }
    Ok(inv)
}

/// Inverts an arbitrary square matrix by Gauss–Jordan elimination with
/// partial pivoting.
///
/// The determinant is tracked as the signed product of pivots; the reported
/// value in [`LinalgError::Singular`] is that product up to the failing pivot.
pub fn invert(m: &Matrix, tolerance: Tolerance) -> Result<Matrix, LinalgError> {
    let n = m.square_dim()?;
    let scale = m.max_abs();
    let mut a = m.clone();
    let mut inv = Matrix::identity(n);
    let mut det = 1.0;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| a[(r1, col)].abs().total_cmp(&a[(r2, col)].abs()))
            .unwrap_or(col);
        let pivot = a[(pivot_row, col)];
        if tolerance.is_negligible(pivot, scale) {
            return Err(LinalgError::Singular {
                determinant: det * pivot,
            });
        }

        if pivot_row != col {
            swap_rows(&mut a, pivot_row, col);
            swap_rows(&mut inv, pivot_row, col);
            det = -det;
        }
        det *= pivot;

        for j in 0..n {
            a[(col, j)] /= pivot;
            inv[(col, j)] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[(row, j)] -= factor * a[(col, j)];
                inv[(row, j)] -= factor * inv[(col, j)];
            }
        }
    }

    Ok(inv)
}

fn swap_rows(m: &mut Matrix, r1: usize, r2: usize) {
    for j in 0..m.cols() {
        let tmp = m[(r1, j)];
        m[(r1, j)] = m[(r2, j)];
        m[(r2, j)] = tmp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_identity(m: &Matrix, tol: f64) {
        let n = m.rows();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (m[(i, j)] - expected).abs() < tol,
                    "entry ({i}, {j}) = {}",
                    m[(i, j)]
                );
            }
        }
    }

    fn sample_gram() -> Matrix {
        // XtX for rows [1, x1, x2] with x1 = 1..=4, x2 = [2, 0, 3, 1]
        Matrix::from_rows(&[[4.0, 10.0, 6.0], [10.0, 30.0, 15.0], [6.0, 15.0, 14.0]])
    }

    #[test]
    fn test_determinant_matches_expansion() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        assert_eq!(determinant_3x3(&m).unwrap(), 1.0);
    }

    #[test]
    fn test_determinant_rejects_wrong_size() {
        assert!(determinant_3x3(&Matrix::identity(2)).is_err());
        assert!(determinant_3x3(&Matrix::zeros(3, 2)).is_err());
    }

    #[test]
    fn test_invert_3x3_known_inverse() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let inv = invert_3x3(&m, Tolerance::default()).unwrap();
        let expected = Matrix::from_rows(&[[-24.0, 18.0, 5.0], [20.0, -15.0, -4.0], [-5.0, 4.0, 1.0]]);
        for i in 0..3 {
            for j in 0..3 {
                assert!((inv[(i, j)] - expected[(i, j)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_invert_3x3_product_is_identity() {
        let m = sample_gram();
        let inv = invert_3x3(&m, Tolerance::default()).unwrap();
        assert_identity(&m.matmul(&inv).unwrap(), 1e-10);
    }

    #[test]
    fn test_invert_3x3_singular() {
        // third column is twice the second
        let m = Matrix::from_rows(&[[3.0, 6.0, 12.0], [6.0, 14.0, 28.0], [12.0, 28.0, 56.0]]);
        let err = invert_3x3(&m, Tolerance::default()).unwrap_err();
        assert!(matches!(err, LinalgError::Singular { .. }));
        let err = invert_3x3(&m, Tolerance::absolute(1e-9)).unwrap_err();
        assert!(matches!(err, LinalgError::Singular { .. }));
    }

    #[test]
    fn test_relative_tolerance_is_scale_invariant() {
        // det = 1e-12 * 1e-12 * 1e-12, tiny in absolute terms but well conditioned
        let m = Matrix::from_rows(&[[1e-12, 0.0, 0.0], [0.0, 1e-12, 0.0], [0.0, 0.0, 1e-12]]);
        assert!(invert_3x3(&m, Tolerance::default()).is_ok());
        assert!(matches!(
            invert_3x3(&m, Tolerance::absolute(1e-9)),
            Err(LinalgError::Singular { .. })
        ));
    }

    #[test]
    fn test_relative_tolerance_handles_huge_entries() {
        // squaring 1e155 overflows, but the determinant is only 1e5
        let m = Matrix::from_rows(&[[1e155, 0.0, 0.0], [0.0, 1e-150, 0.0], [0.0, 0.0, 1.0]]);
        let inv = invert_3x3(&m, Tolerance::default()).unwrap();
        assert!((inv[(0, 0)] * 1e155 - 1.0).abs() < 1e-12);
        assert!((inv[(1, 1)] * 1e-150 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_determinant_is_an_error() {
        let m = Matrix::from_rows(&[[1e200, 0.0, 0.0], [0.0, 1e200, 0.0], [0.0, 0.0, 1.0]]);
        assert!(matches!(
            invert_3x3(&m, Tolerance::default()),
            Err(LinalgError::Overflow)
        ));
    }

    #[test]
    fn test_zero_matrix_is_singular_in_both_modes() {
        let m = Matrix::zeros(3, 3);
        assert!(invert_3x3(&m, Tolerance::default()).is_err());
        assert!(invert_3x3(&m, Tolerance::absolute(0.0)).is_err());
        assert!(invert(&m, Tolerance::default()).is_err());
    }

    #[test]
    fn test_gauss_jordan_agrees_with_cofactor_inverse() {
        let m = sample_gram();
        let a = invert_3x3(&m, Tolerance::default()).unwrap();
        let b = invert(&m, Tolerance::default()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert!((a[(i, j)] - b[(i, j)]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_gauss_jordan_needs_pivoting() {
        let m = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]);
        let inv = invert(&m, Tolerance::default()).unwrap();
        assert_eq!(inv, m);
    }

    #[test]
    fn test_gauss_jordan_larger_matrix() {
        let m = Matrix::from_rows(&[
            [4.0, 1.0, 0.0, 0.0],
            [1.0, 4.0, 1.0, 0.0],
            [0.0, 1.0, 4.0, 1.0],
            [0.0, 0.0, 1.0, 4.0],
        ]);
        let inv = invert(&m, Tolerance::default()).unwrap();
        assert_identity(&m.matmul(&inv).unwrap(), 1e-12);
    }

    #[test]
    fn test_gauss_jordan_singular() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
        assert!(matches!(
            invert(&m, Tolerance::default()),
            Err(LinalgError::Singular { .. })
        ));
    }

    #[test]
    fn test_gauss_jordan_rejects_non_square() {
        assert!(matches!(
            invert(&Matrix::zeros(2, 3), Tolerance::default()),
            Err(LinalgError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_is_negligible() {
        let tol = Tolerance::relative(1e-6);
        assert!(tol.is_negligible(1e-7, 1.0));
        assert!(!tol.is_negligible(1e-7, 1e-3));
        assert!(tol.is_negligible(f64::NAN, 1.0));
        assert!(tol.is_negligible(0.0, 0.0));
    }
}
