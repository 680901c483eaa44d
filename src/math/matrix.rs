use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Mul};

use crate::error::{HestonNnError, Result};

/// Row-major dense matrix. A batch of samples is stored one sample per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Samples every entry from U(-bound, bound).
    ///
    /// Linear layers use `bound = 1 / sqrt(fan_in)` for both weights and biases.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, bound: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = (rng.gen::<f64>() * 2.0 - 1.0) * bound;
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_data(
            self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect()
        )
    }

    /// Like `map`, but the functor also receives the column index.
    pub fn map_columns<F>(&self, functor: F) -> Matrix
    where
        F: Fn(usize, f64) -> f64,
    {
        Matrix::from_data(
            self.data
                .iter()
                .map(|row| row.iter().enumerate().map(|(j, &x)| functor(j, x)).collect())
                .collect()
        )
    }

    /// Wraps already-rectangular data. Use `from_rows` for untrusted input.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, Vec::len),
            data
        }
    }

    /// Builds a matrix from rows, rejecting ragged input.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(HestonNnError::shape(
                format!("rows of width {cols}"),
                format!("a row of width {}", bad.len()),
            ));
        }
        Ok(Matrix::from_data(data))
    }

    /// Reshapes a flat row-major buffer into `(len / cols, cols)`.
    pub fn from_flat(values: &[f64], cols: usize) -> Result<Matrix> {
        if cols == 0 || values.len() % cols != 0 {
            return Err(HestonNnError::shape(
                format!("a multiple of {cols} values"),
                format!("{} values", values.len()),
            ));
        }
        Ok(Matrix::from_data(values.chunks(cols).map(<[f64]>::to_vec).collect()))
    }

    /// True when `data` really holds `rows` rows of `cols` values each.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

/// Element-wise addition. A `1 x n` right-hand side is broadcast over every row,
/// which is how biases are added to a batch.
impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        let broadcast = rhs.rows == 1 && self.cols == rhs.cols;
        if !broadcast && (self.rows != rhs.rows || self.cols != rhs.cols) {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            let r = if broadcast { 0 } else { i };
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[r][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res =  Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn bias_row_broadcasts_over_batch() {
        let batch = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let bias = Matrix::from_data(vec![vec![10.0, 20.0]]);
        let sum = batch + bias;
        assert_eq!(sum.data, vec![vec![11.0, 22.0], vec![13.0, 24.0]]);
    }

    #[test]
    fn product_has_outer_dimensions() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0, 3.0]]);
        let b = Matrix::from_data(vec![vec![1.0], vec![1.0], vec![1.0]]);
        let c = &a * &b;
        assert_eq!(c.shape(), (1, 1));
        assert_eq!(c.data[0][0], 6.0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, HestonNnError::ShapeMismatch { .. }));
    }

    #[test]
    fn declared_shape_must_match_data() {
        assert!(Matrix::zeros(2, 3).is_consistent());
        assert!(Matrix::default().is_consistent());
        let lying = Matrix { rows: 2, cols: 2, data: vec![vec![1.0, 2.0]] };
        assert!(!lying.is_consistent());
    }

    #[test]
    fn flat_buffer_reshapes_row_major() {
        let m = Matrix::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert!(Matrix::from_flat(&[1.0, 2.0], 3).is_err());
    }

    #[test]
    fn uniform_stays_within_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::uniform(16, 16, 0.25, &mut rng);
        assert!(m.data.iter().flatten().all(|x| x.abs() <= 0.25));
    }
}
