use super::Matrix;
use ndarray::Array2;

impl From<&Matrix> for Array2<f64> {
    fn from(m: &Matrix) -> Self {
        Array2::from_shape_fn(m.shape(), |(i, j)| m[(i, j)])
    }
}

impl From<&Array2<f64>> for Matrix {
    /// Copies in logical (row-major) order regardless of the array's memory layout.
    fn from(a: &Array2<f64>) -> Self {
        let (rows, cols) = a.dim();
        Matrix {
            data: a.iter().copied().collect(),
            rows,
            cols,
        }
    }
}
