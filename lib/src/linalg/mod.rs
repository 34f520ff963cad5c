//! # Linear algebra
//!
//! A small dense-matrix utility sized for normal equations: a row-major
//! [`Matrix`] addressed by `(row, col)`, matrix–vector and matrix–matrix
//! products, overflow-safe row norms, and two inversion routines in [`inverse`]:
//!
//! | Routine | Size | Method |
//! |---------|------|--------|
//! | [`invert_3x3`] | 3×3 | cofactor expansion / adjugate |
//! | [`invert`] | n×n | Gauss–Jordan with partial pivoting |
//!
//! Both reject singular input through a [`Tolerance`] instead of dividing by
//! a near-zero determinant.
//!
//! With the `ndarray` feature enabled, [`Matrix`] converts to and from
//! `ndarray::Array2<f64>`.

use crate::error::LinalgError;
use std::ops::{Index, IndexMut};

pub mod inverse;
#[cfg(feature = "ndarray")]
mod ndarray_interop;

pub use inverse::{determinant_3x3, invert, invert_3x3, Tolerance, ToleranceMode};

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Builds a matrix from a row-major buffer.
    ///
    /// # Errors
    /// [`LinalgError::DimensionMismatch`] if `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, LinalgError> {
        if data.len() != rows * cols {
            return Err(LinalgError::DimensionMismatch {
                expected: format!("{} elements ({}x{})", rows * cols, rows, cols),
                got: format!("{} elements", data.len()),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Builds a matrix from fixed-width rows.
    ///
    /// ```rust
    /// use stride_regression::linalg::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m.shape(), (2, 2));
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        Self {
            data: rows.iter().flat_map(|row| row.iter()).copied().collect(),
            rows: rows.len(),
            cols: N,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Bounds-checked element access.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }

    /// Computes `self · v`.
    pub fn matvec(&self, v: &[f64]) -> Result<Vec<f64>, LinalgError> {
        if v.len() != self.cols {
            return Err(LinalgError::DimensionMismatch {
                expected: format!("vector of length {}", self.cols),
                got: format!("vector of length {}", v.len()),
            });
        }
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Computes `self · other`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != other.rows {
            return Err(LinalgError::DimensionMismatch {
                expected: format!("{} rows on the right operand", self.cols),
                got: format!("{}x{}", other.rows, other.cols),
            });
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(i, k)];
                for j in 0..other.cols {
                    out[(i, j)] += a * other[(k, j)];
                }
            }
        }
        Ok(out)
    }

    /// Largest absolute entry, `0.0` for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
    }

    /// Euclidean norm of one row, accumulated with `hypot` so that entries
    /// above `1e154` do not overflow when squared.
    ///
    /// By Hadamard's inequality the product of the row norms bounds `|det|`
    /// from above.
    pub fn row_norm(&self, row: usize) -> f64 {
        self.row(row).iter().fold(0.0_f64, |acc, &x| acc.hypot(x))
    }

    pub(crate) fn square_dim(&self) -> Result<usize, LinalgError> {
        if self.is_square() {
            Ok(self.rows)
        } else {
            Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inconsistent_shape() {
        let err = Matrix::new(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(err, LinalgError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_index_is_row_major() {
        let m = Matrix::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::zeros(2, 2);
        assert_eq!(m.get(1, 1), Some(0.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_matvec() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.matvec(&[1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
        assert!(m.matvec(&[1.0]).is_err());
    }

    #[test]
    fn test_matmul_identity() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.matmul(&Matrix::identity(2)).unwrap(), m);
        assert!(m.matmul(&Matrix::identity(3)).is_err());
    }

    #[test]
    fn test_row_norms_bound_determinant() {
        let m = Matrix::from_rows(&[[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]]);
        let det = determinant_3x3(&m).unwrap();
        let bound: f64 = (0..3).map(|i| m.row_norm(i)).product();
        assert!(det.abs() <= bound);
    }

    #[test]
    fn test_row_norm_does_not_overflow() {
        let m = Matrix::from_rows(&[[3e200, 4e200], [0.0, 0.0]]);
        assert!((m.row_norm(0) / 5e200 - 1.0).abs() < 1e-15);
        assert_eq!(m.row_norm(1), 0.0);
    }

    #[test]
    fn test_square_dim() {
        assert_eq!(Matrix::zeros(3, 3).square_dim().unwrap(), 3);
        assert!(matches!(
            Matrix::zeros(2, 3).square_dim(),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        ));
    }
}
