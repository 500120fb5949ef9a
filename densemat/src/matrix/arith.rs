//! Element-wise arithmetic, products and transposition
//!
//! Every operation builds a fresh table and commits it, so the determinant
//! cache is cleared and the other statistics are recomputed.

use mdarray::DTensor;

use super::base::Matrix;
use crate::error::{MatrixError, Result};
use crate::vector::{Components, Vector};

impl Matrix {
    fn check_same_size(&self, other: &Matrix) -> Result<(usize, usize)> {
        let size = self.size()?;
        if size != other.size()? {
            return Err(MatrixError::invalid(format!(
                "Matrices must have the same dimensions: {:?} vs {:?}",
                size,
                other.size()?
            )));
        }
        Ok(size)
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&mut self, other: &Matrix, f: F) -> Result<()> {
        let (nr, nc) = self.check_same_size(other)?;
        let data = DTensor::<f64, 2>::from_fn([nr, nc], |idx| {
            f(self.data[[idx[0], idx[1]]], other.data[[idx[0], idx[1]]])
        });
        self.commit(data)
    }

    /// Add `other` to this matrix element-wise
    pub fn add(&mut self, other: &Matrix) -> Result<()> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Subtract `other` from this matrix element-wise
    pub fn sub(&mut self, other: &Matrix) -> Result<()> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiply every element by `factor`
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() {
            return Err(MatrixError::invalid(format!("Parameter must be a number, got {}", factor)));
        }
        let (nr, nc) = self.size()?;
        let data = DTensor::<f64, 2>::from_fn([nr, nc], |idx| factor * self.data[[idx[0], idx[1]]]);
        self.commit(data)
    }

    /// Multiply one row by `factor`
    pub fn scale_row(&mut self, row: usize, factor: f64) -> Result<()> {
        if !factor.is_finite() {
            return Err(MatrixError::invalid(format!(
                "Row factor must be a valid number, got {}",
                factor
            )));
        }
        let scaled: Vec<f64> = self.row(row)?.into_iter().map(|x| x * factor).collect();
        self.set_row(row, &scaled)
    }

    /// Replace this matrix `A` with the product `A * other`
    ///
    /// Entries whose magnitude is at most the matrix epsilon are stored as
    /// exactly zero.
    pub fn multiply(&mut self, other: &Matrix) -> Result<()> {
        let (nr, nk) = self.size()?;
        let (other_rows, nc) = other.size()?;
        if nk != other_rows {
            return Err(MatrixError::invalid(format!(
                "Incompatible sizes: {} columns in matrix, {} rows in parameter matrix",
                nk, other_rows
            )));
        }
        let eps = self.epsilon;
        let data = DTensor::<f64, 2>::from_fn([nr, nc], |idx| {
            let (i, j) = (idx[0], idx[1]);
            let mut sum = 0.0;
            for k in 0..nk {
                sum += self.data[[i, k]] * other.data[[k, j]];
            }
            snap(sum, eps)
        });
        self.commit(data)
    }

    /// `a * b` as a new matrix; `a` is left untouched
    pub fn multiply_matrices(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.require_data()?;
        let mut result = a.clone();
        result.multiply(b)?;
        Ok(result)
    }

    /// Matrix-vector product `A * v`, snapped like [`Matrix::multiply`]
    pub fn vector_multiply<V: Components + ?Sized>(&self, v: &V) -> Result<Vector> {
        let (nr, nc) = self.size()?;
        let x = v.as_slice();
        if x.len() != nc {
            return Err(MatrixError::invalid(format!(
                "Vector of size {} cannot multiply a matrix with {} columns",
                x.len(),
                nc
            )));
        }
        let out = (0..nr)
            .map(|i| {
                let sum: f64 = (0..nc).map(|j| self.data[[i, j]] * x[j]).sum();
                snap(sum, self.epsilon)
            })
            .collect();
        Ok(Vector::new(out))
    }

    /// Swap rows and columns in place
    pub fn transpose(&mut self) -> Result<()> {
        let (nr, nc) = self.size()?;
        let data = DTensor::<f64, 2>::from_fn([nc, nr], |idx| self.data[[idx[1], idx[0]]]);
        self.commit(data)
    }

    /// Transposed copy
    pub fn transposed(&self) -> Result<Matrix> {
        let mut t = self.clone();
        t.transpose()?;
        Ok(t)
    }
}

#[inline]
fn snap(value: f64, eps: f64) -> f64 {
    if value.abs() <= eps {
        0.0
    } else {
        value
    }
}
