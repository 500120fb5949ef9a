//! Inversion and linear solves
//!
//! All routines share the pivot search and singularity check of
//! [`Matrix::determinant`], and every successful elimination seeds the
//! determinant cache of the matrix it factored.

use log::{debug, trace, warn};

use super::base::Matrix;
use super::det::{check_pivot, partial_pivot};
use crate::error::{MatrixError, Result};
use crate::precision::{norm_2, residual, TwoFloatPrecision};
use crate::vector::{Components, Vector};

/// Configuration for [`Matrix::solve_ec_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementConfig {
    /// Maximum number of correction steps after the initial solve
    pub max_iterations: usize,
    /// Stop once `|b - A x| <= tolerance * |b|`
    pub tolerance: f64,
}

impl RefinementConfig {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(MatrixError::invalid(format!(
                "Refinement tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self::new(10, f64::EPSILON)
    }
}

impl Matrix {
    /// Replace this matrix with its inverse
    ///
    /// Gauss-Jordan elimination on `[A | I]`. On error the matrix is left
    /// untouched.
    pub fn invert(&mut self) -> Result<()> {
        let n = self.require_square()?;
        let norm = self.norm()?;

        let mut aug: Vec<Vec<f64>> = self
            .rows_unchecked()
            .into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                row.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
                row
            })
            .collect();

        let mut det = 1.0;
        let mut sign = 1.0;
        for r in 0..n {
            if partial_pivot(&mut aug, r) {
                sign = -sign;
            }

            let pivot = aug[r][r];
            det *= pivot;
            check_pivot(det, norm, self.epsilon, pivot, r)?;

            for v in aug[r].iter_mut() {
                *v /= pivot;
            }
            let pivot_row = aug[r].clone();
            for (i, row) in aug.iter_mut().enumerate() {
                if i == r || row[r] == 0.0 {
                    continue;
                }
                let factor = row[r];
                for (x, p) in row.iter_mut().zip(&pivot_row) {
                    *x -= factor * p;
                }
            }
        }

        let inverse: Vec<Vec<f64>> = aug.into_iter().map(|row| row[n..].to_vec()).collect();
        self.set_data(&inverse)?;
        self.det.set(Some(1.0 / (sign * det)));
        Ok(())
    }

    /// Inverse as a new matrix
    pub fn inverse(&self) -> Result<Matrix> {
        let mut inv = self.clone();
        inv.invert()?;
        Ok(inv)
    }

    /// Solve `A x = b` by forward elimination with partial pivoting and
    /// back substitution
    pub fn solve<V: Components + ?Sized>(a: &Matrix, b: &V) -> Result<Vector> {
        a.solve_slice(b.as_slice()).map(Vector::new)
    }

    fn solve_slice(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.require_square()?;
        if b.len() != n {
            return Err(MatrixError::invalid(format!(
                "Right-hand side has {} elements, matrix has {} rows",
                b.len(),
                n
            )));
        }
        let norm = self.norm()?;

        // Augmented copy [A | b]
        let mut aug: Vec<Vec<f64>> = self
            .rows_unchecked()
            .into_iter()
            .zip(b)
            .map(|(mut row, &bi)| {
                row.push(bi);
                row
            })
            .collect();

        let mut det = 1.0;
        let mut sign = 1.0;
        for r in 0..n {
            if partial_pivot(&mut aug, r) {
                sign = -sign;
            }

            let pivot = aug[r][r];
            det *= pivot;
            check_pivot(det, norm, self.epsilon, pivot, r)?;

            for i in (r + 1)..n {
                let factor = aug[i][r] / pivot;
                for j in r..=n {
                    aug[i][j] -= factor * aug[r][j];
                }
            }
        }
        self.det.set(Some(sign * det));

        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = aug[i][n];
            for j in (i + 1)..n {
                sum -= aug[i][j] * x[j];
            }
            x[i] = sum / aug[i][i];
        }
        Ok(x)
    }

    /// [`Matrix::solve`] followed by iterative refinement with the default
    /// [`RefinementConfig`]
    pub fn solve_ec<V: Components + ?Sized>(a: &Matrix, b: &V) -> Result<Vector> {
        Self::solve_ec_with(a, b, &RefinementConfig::default())
    }

    /// Solve `A x = b`, then repeatedly correct `x` by solving `A e = r` for
    /// the residual `r = b - A x`
    ///
    /// Residuals are accumulated in double-double precision. A correction is
    /// only accepted if it shrinks the residual, so the result is never worse
    /// than the plain [`Matrix::solve`].
    pub fn solve_ec_with<V: Components + ?Sized>(
        a: &Matrix,
        b: &V,
        config: &RefinementConfig,
    ) -> Result<Vector> {
        config.validate()?;
        let b = b.as_slice();
        let mut x = a.solve_slice(b)?;
        let rows = a.rows_unchecked();

        let target = config.tolerance * norm_2::<f64>(b).max(f64::MIN_POSITIVE);
        let mut r = residual::<TwoFloatPrecision>(&rows, &x, b);
        let mut r_norm = norm_2::<TwoFloatPrecision>(&r);
        debug!("solve_ec: initial residual {:e}, target {:e}", r_norm, target);

        for iter in 0..config.max_iterations {
            if r_norm <= target {
                debug!("solve_ec: converged after {} corrections", iter);
                return Ok(Vector::new(x));
            }

            let e = a.solve_slice(&r)?;
            let candidate: Vec<f64> = x.iter().zip(&e).map(|(xi, ei)| xi + ei).collect();
            let cand_r = residual::<TwoFloatPrecision>(&rows, &candidate, b);
            let cand_norm = norm_2::<TwoFloatPrecision>(&cand_r);
            trace!("solve_ec: iteration {} residual {:e}", iter, cand_norm);

            if cand_norm >= r_norm {
                debug!(
                    "solve_ec: correction {} did not reduce the residual ({:e} >= {:e}), stopping",
                    iter, cand_norm, r_norm
                );
                return Ok(Vector::new(x));
            }
            x = candidate;
            r = cand_r;
            r_norm = cand_norm;
        }

        if r_norm > target {
            warn!(
                "solve_ec: residual {:e} above target {:e} after {} iterations",
                r_norm, target, config.max_iterations
            );
        }
        Ok(Vector::new(x))
    }
}

#[cfg(test)]
#[path = "linear_tests.rs"]
mod tests;
