use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul};

use crate::error::{RegressionError, Result};

/// Dense row-major matrix of `f64`.
///
/// Operator impls (`+`, `-`, `*`) panic on incompatible shapes: every call
/// site inside the crate has already validated caller input, so a mismatch
/// there is a bug rather than a recoverable condition.
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

    pub fn ones(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![1.0; cols]; rows]
        }
    }

    /// Builds a matrix from literal rows. Panics on ragged input;
    /// use [`Matrix::from_rows`] for data that comes from a caller.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(data).expect("Matrix::from_data requires rectangular rows")
    }

    /// Builds a matrix from caller-supplied rows, rejecting ragged input.
    /// Zero rows yield a 0×0 matrix.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, |row| row.len());
        Matrix::from_rows_with_cols(data, cols)
    }

    /// Like [`Matrix::from_rows`] but with the column count fixed up front, so
    /// an empty row set still carries a width.
    pub fn from_rows_with_cols(data: Vec<Vec<f64>>, cols: usize) -> Result<Matrix> {
        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(RegressionError::shape(
                format!("{} columns in every row", cols),
                format!("{} columns in row {}", row.len(), i),
            ));
        }
        Ok(Matrix { rows: data.len(), cols, data })
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    pub fn add_scalar(&self, value: f64) -> Matrix {
        self.map(|x| x + value)
    }

    pub fn ln(&self) -> Matrix {
        self.map(f64::ln)
    }

    /// Element-wise logistic function.
    pub fn sigmoid(&self) -> Matrix {
        self.map(|x| 1.0 / (1.0 + (-x).exp()))
    }

    /// Copies rows `[start, end)` into a new matrix.
    pub fn slice_rows(&self, start: usize, end: usize) -> Matrix {
        assert!(start <= end && end <= self.rows, "row range {}..{} out of bounds for {} rows", start, end, self.rows);
        Matrix {
            rows: end - start,
            cols: self.cols,
            data: self.data[start..end].to_vec(),
        }
    }

    /// Subtracts `row` from every row.
    pub fn sub_row_broadcast(&self, row: &[f64]) -> Matrix {
        assert_eq!(row.len(), self.cols, "broadcast row has the wrong width");
        self.zip_row(row, |x, r| x - r)
    }

    /// Divides every row element-wise by `row`.
    pub fn div_row_broadcast(&self, row: &[f64]) -> Matrix {
        assert_eq!(row.len(), self.cols, "broadcast row has the wrong width");
        self.zip_row(row, |x, r| x / r)
    }

    fn zip_row<F>(&self, row: &[f64], op: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|r| r.iter().zip(row.iter()).map(|(&x, &b)| op(x, b)).collect())
                .collect(),
        }
    }

    /// Prepends a column of ones, turning an N×D matrix into N×(D+1).
    pub fn hstack_ones_left(&self) -> Matrix {
        let data = self.data.iter()
            .map(|row| {
                let mut out = Vec::with_capacity(row.len() + 1);
                out.push(1.0);
                out.extend_from_slice(row);
                out
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols + 1, data }
    }

    /// Row-wise softmax. The row maximum is subtracted before exponentiating
    /// so large scores cannot overflow.
    pub fn softmax_rows(&self) -> Matrix {
        let data = self.data.iter()
            .map(|row| {
                let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let exps: Vec<f64> = row.iter().map(|&x| (x - max).exp()).collect();
                let sum: f64 = exps.iter().sum();
                exps.into_iter().map(|e| e / sum).collect()
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Index of the maximum value in each row. Ties resolve to the lowest index.
    pub fn argmax_rows(&self) -> Vec<usize> {
        self.data.iter().map(|row| argmax(row)).collect()
    }

    /// In-place `self -= factor * other`.
    pub fn sub_assign_scaled(&mut self, other: &Matrix, factor: f64) {
        assert_same_shape(self, other);
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, &o) in row.iter_mut().zip(other_row.iter()) {
                *x -= factor * o;
            }
        }
    }

    /// Population mean and variance (divisor N) of every column.
    pub fn column_moments(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.rows as f64;
        let mut mean = vec![0.0; self.cols];
        for row in &self.data {
            for (m, &x) in mean.iter_mut().zip(row.iter()) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut variance = vec![0.0; self.cols];
        for row in &self.data {
            for ((v, &x), &m) in variance.iter_mut().zip(row.iter()).zip(mean.iter()) {
                *v += (x - m) * (x - m);
            }
        }
        variance.iter_mut().for_each(|v| *v /= n);

        (mean, variance)
    }
}

/// Index of the first maximum element in a slice; 0 for an empty slice.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > v[best] {
            best = i;
        }
    }
    best
}

fn assert_same_shape(a: &Matrix, b: &Matrix) {
    if a.rows != b.rows || a.cols != b.cols {
        panic!("Matrices are of incorrect sizes: {}x{} vs {}x{}", a.rows, a.cols, b.rows, b.cols)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        assert_same_shape(self, rhs);

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_same_shape(self, rhs);

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes: {}x{} * {}x{}", self.rows, self.cols, rhs.rows, rhs.cols)
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        // i-k-j order keeps the inner loop walking contiguous rows.
        for i in 0..self.rows {
            let out = &mut res.data[i];
            for k in 0..self.cols {
                let a = self.data[i][k];
                if a == 0.0 {
                    continue;
                }
                for (o, &b) in out.iter_mut().zip(rhs.data[k].iter()) {
                    *o += a * b;
                }
            }
        }

        res
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}
