//! Determinant by Gaussian elimination with partial pivoting
//!
//! The pivot search and singularity check live here and are reused by
//! [`Matrix::invert`] and [`Matrix::solve`], so all three agree on which
//! matrices are singular.

use log::trace;

use super::base::Matrix;
use crate::error::{MatrixError, Result};

/// Index of the row at or below `r` with the largest `|a[i][r]|`
pub(crate) fn pivot_row(a: &[Vec<f64>], r: usize) -> usize {
    let mut ridx = r;
    let mut best = a[r][r].abs();
    for (i, row) in a.iter().enumerate().skip(r + 1) {
        let val = row[r].abs();
        if val > best {
            best = val;
            ridx = i;
        }
    }
    ridx
}

/// Bring the best pivot onto the diagonal, returning true if rows were swapped
pub(crate) fn partial_pivot(a: &mut [Vec<f64>], r: usize) -> bool {
    let ridx = pivot_row(a, r);
    if ridx != r {
        trace!("pivot: swapping rows {} and {}", r, ridx);
        a.swap(r, ridx);
        true
    } else {
        false
    }
}

/// Reject a pivot step when the running determinant says the matrix is
/// (near-)singular
///
/// `det` is the product of the pivots so far, including `pivot`.
pub(crate) fn check_pivot(det: f64, norm: f64, epsilon: f64, pivot: f64, row: usize) -> Result<()> {
    let normalized = det.abs() / norm;
    if normalized < epsilon {
        return Err(MatrixError::Singular {
            normalized_determinant: normalized,
        });
    }
    if pivot == 0.0 {
        return Err(MatrixError::ZeroPivot { row });
    }
    Ok(())
}

impl Matrix {
    pub(crate) fn require_square(&self) -> Result<usize> {
        let (nr, nc) = self.size()?;
        if nr != nc {
            return Err(MatrixError::invalid(format!(
                "Operation undefined for non-square {}x{} matrix",
                nr, nc
            )));
        }
        Ok(nr)
    }

    /// Determinant, computed once and cached until the data changes
    ///
    /// Fails with [`MatrixError::Singular`] as soon as the normalized running
    /// determinant `|det| / norm` drops below the matrix epsilon, and with
    /// [`MatrixError::ZeroPivot`] if a pivot is exactly zero.
    pub fn determinant(&self) -> Result<f64> {
        if let Some(det) = self.det.get() {
            return Ok(det);
        }
        let n = self.require_square()?;
        let norm = self.norm()?;

        // Work on a copy
        let mut a = self.rows_unchecked();
        let mut det = 1.0;
        let mut sign = 1.0;

        for r in 0..n {
            if partial_pivot(&mut a, r) {
                sign = -sign;
            }

            let pivot = a[r][r];
            det *= pivot;
            check_pivot(det, norm, self.epsilon, pivot, r)?;

            // Zero all elements in the column below the pivot
            for i in (r + 1)..n {
                let factor = a[i][r] / pivot;
                for j in r..n {
                    a[i][j] -= factor * a[r][j];
                }
            }
        }

        let det = sign * det;
        self.det.set(Some(det));
        Ok(det)
    }

    /// `|determinant| / euclidean norm`
    pub fn normalized_determinant(&self) -> Result<f64> {
        let det = self.determinant()?;
        let norm = self.norm()?;
        if norm == 0.0 {
            return Err(MatrixError::DivisionByZero(
                "Undefined normalized determinant, euclidean norm is zero".to_string(),
            ));
        }
        Ok((det / norm).abs())
    }
}

#[cfg(test)]
#[path = "det_tests.rs"]
mod tests;
