//! Matrix storage, validation and accessors

use std::cell::Cell;

use mdarray::DTensor;

use crate::error::{MatrixError, Result};

/// Cutoff used both to flag singular or ill-conditioned matrices and to snap
/// round-off noise to zero in products
pub const DEFAULT_EPSILON: f64 = 1e-18;

/// Dense, row-major `rows x cols` matrix of finite reals
///
/// Derived statistics (size, squareness, min, max, Euclidean norm) are
/// recomputed whenever the table is replaced, and the determinant is cached
/// on first computation and cleared on every replacement. All replacements go
/// through [`Matrix::commit`], so none of these can be observed stale.
///
/// A matrix with zero rows or zero columns is empty; every operation other
/// than construction fails on it with [`MatrixError::Uninitialized`].
#[derive(Debug, Clone)]
pub struct Matrix {
    pub(crate) data: DTensor<f64, 2>,
    num_rows: usize,
    num_cols: usize,
    square: bool,
    min: f64,
    max: f64,
    norm: f64,
    pub(crate) det: Cell<Option<f64>>,
    pub(crate) epsilon: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Matrix {
    /// Empty matrix; populate it with [`Matrix::set_data`]
    pub fn new() -> Self {
        Self {
            data: DTensor::<f64, 2>::from_fn([0, 0], |_| 0.0),
            num_rows: 0,
            num_cols: 0,
            square: false,
            min: 0.0,
            max: 0.0,
            norm: 0.0,
            det: Cell::new(None),
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Build from a rectangular row-major table
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let mut m = Self::new();
        m.set_data(rows)?;
        Ok(m)
    }

    /// Build from an existing tensor, validating its elements
    ///
    /// The dimensions are taken from the tensor's shape.
    pub fn from_tensor(data: DTensor<f64, 2>) -> Result<Self> {
        let mut m = Self::new();
        m.commit(data)?;
        Ok(m)
    }

    /// `n x n` identity
    pub fn identity(n: usize) -> Result<Self> {
        check_dims(n, n)?;
        let data = DTensor::<f64, 2>::from_fn([n, n], |idx| if idx[0] == idx[1] { 1.0 } else { 0.0 });
        Self::from_tensor(data)
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// `rows x cols` matrix with every element equal to `value`
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self> {
        check_dims(rows, cols)?;
        let data = DTensor::<f64, 2>::from_fn([rows, cols], |_| value);
        Self::from_tensor(data)
    }

    /// Replace the table, validating that it is rectangular and finite
    ///
    /// An empty table (no rows, or rows with no columns) leaves the matrix
    /// empty. On error the previous contents are kept.
    pub fn set_data<R: AsRef<[f64]>>(&mut self, rows: &[R]) -> Result<()> {
        let nr = rows.len();
        let nc = rows.first().map_or(0, |r| r.as_ref().len());
        for (i, row) in rows.iter().enumerate() {
            if row.as_ref().len() != nc {
                return Err(MatrixError::invalid(format!(
                    "Invalid data, cannot create/modify matrix: row {} has {} columns, expected {}",
                    i,
                    row.as_ref().len(),
                    nc
                )));
            }
        }
        let data = DTensor::<f64, 2>::from_fn([nr, nc], |idx| rows[idx[0]].as_ref()[idx[1]]);
        self.commit(data)
    }

    /// Replace the contents with a copy of another matrix
    pub fn set_from(&mut self, other: &Matrix) -> Result<()> {
        other.require_data()?;
        self.commit(other.data.clone())
    }

    /// The single gatekeeper for the table: validates every element and
    /// recomputes all cached statistics in one pass
    ///
    /// Dimensions always come from the tensor itself.
    pub(crate) fn commit(&mut self, data: DTensor<f64, 2>) -> Result<()> {
        let (rows, cols) = *data.shape();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum_sq = 0.0;
        for i in 0..rows {
            for j in 0..cols {
                let v = data[[i, j]];
                if !v.is_finite() {
                    return Err(MatrixError::invalid(format!(
                        "Invalid data, cannot create/modify matrix: element ({}, {}) is not a finite number",
                        i, j
                    )));
                }
                min = min.min(v);
                max = max.max(v);
                sum_sq += v * v;
            }
        }

        let empty = rows == 0 || cols == 0;
        self.data = data;
        self.num_rows = if empty { 0 } else { rows };
        self.num_cols = if empty { 0 } else { cols };
        self.square = !empty && rows == cols;
        self.min = if empty { 0.0 } else { min };
        self.max = if empty { 0.0 } else { max };
        self.norm = sum_sq.sqrt();
        self.det.set(None);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.num_cols == 0
    }

    pub(crate) fn require_data(&self) -> Result<()> {
        if self.is_empty() {
            return Err(MatrixError::empty_matrix());
        }
        Ok(())
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Result<(usize, usize)> {
        self.require_data()?;
        Ok((self.num_rows, self.num_cols))
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_square(&self) -> Result<bool> {
        self.require_data()?;
        Ok(self.square)
    }

    /// Euclidean norm `sqrt(sum(e[i][j]^2))`
    pub fn norm(&self) -> Result<f64> {
        self.require_data()?;
        Ok(self.norm)
    }

    pub fn min(&self) -> Result<f64> {
        self.require_data()?;
        Ok(self.min)
    }

    pub fn max(&self) -> Result<f64> {
        self.require_data()?;
        Ok(self.max)
    }

    pub fn min_max(&self) -> Result<(f64, f64)> {
        self.require_data()?;
        Ok((self.min, self.max))
    }

    /// Determinant if it has already been computed for the current data
    pub fn cached_determinant(&self) -> Option<f64> {
        self.det.get()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Set the singularity cutoff and the round-off snapping threshold
    pub fn set_zero_threshold(&mut self, epsilon: f64) -> Result<()> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(MatrixError::invalid(format!(
                "Zero threshold must be a non-negative number, got {}",
                epsilon
            )));
        }
        self.epsilon = epsilon;
        // The singularity verdict depends on the cutoff
        self.det.set(None);
        Ok(())
    }

    /// Borrow the underlying storage
    pub fn as_tensor(&self) -> &DTensor<f64, 2> {
        &self.data
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.num_rows {
            return Err(MatrixError::invalid(format!(
                "Row index {} out of bounds for {} rows",
                row, self.num_rows
            )));
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.num_cols {
            return Err(MatrixError::invalid(format!(
                "Column index {} out of bounds for {} columns",
                col, self.num_cols
            )));
        }
        Ok(())
    }

    pub fn element(&self, row: usize, col: usize) -> Result<f64> {
        self.require_data()?;
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[[row, col]])
    }

    pub fn set_element(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.require_data()?;
        self.check_row(row)?;
        self.check_col(col)?;
        let mut data = self.data.clone();
        data[[row, col]] = value;
        self.commit(data)
    }

    pub fn row(&self, row: usize) -> Result<Vec<f64>> {
        self.require_data()?;
        self.check_row(row)?;
        Ok((0..self.num_cols).map(|j| self.data[[row, j]]).collect())
    }

    /// Replace one row; `values` must have exactly `cols` elements
    pub fn set_row(&mut self, row: usize, values: &[f64]) -> Result<()> {
        self.require_data()?;
        self.check_row(row)?;
        if values.len() != self.num_cols {
            return Err(MatrixError::invalid(format!(
                "Incorrect size for matrix row: expecting {} columns, got {} columns",
                self.num_cols,
                values.len()
            )));
        }
        let mut data = self.data.clone();
        for (j, &v) in values.iter().enumerate() {
            data[[row, j]] = v;
        }
        self.commit(data)
    }

    pub fn col(&self, col: usize) -> Result<Vec<f64>> {
        self.require_data()?;
        self.check_col(col)?;
        Ok((0..self.num_rows).map(|i| self.data[[i, col]]).collect())
    }

    /// Replace one column; `values` must have exactly `rows` elements
    pub fn set_col(&mut self, col: usize, values: &[f64]) -> Result<()> {
        self.require_data()?;
        self.check_col(col)?;
        if values.len() != self.num_rows {
            return Err(MatrixError::invalid(format!(
                "Incorrect size for matrix column: expecting {} rows, got {} rows",
                self.num_rows,
                values.len()
            )));
        }
        let mut data = self.data.clone();
        for (i, &v) in values.iter().enumerate() {
            data[[i, col]] = v;
        }
        self.commit(data)
    }

    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<()> {
        self.require_data()?;
        self.check_row(r1)?;
        self.check_row(r2)?;
        let (nr, nc) = (self.num_rows, self.num_cols);
        let data = DTensor::<f64, 2>::from_fn([nr, nc], |idx| {
            let i = match idx[0] {
                i if i == r1 => r2,
                i if i == r2 => r1,
                i => i,
            };
            self.data[[i, idx[1]]]
        });
        self.commit(data)
    }

    pub fn swap_cols(&mut self, c1: usize, c2: usize) -> Result<()> {
        self.require_data()?;
        self.check_col(c1)?;
        self.check_col(c2)?;
        let (nr, nc) = (self.num_rows, self.num_cols);
        let data = DTensor::<f64, 2>::from_fn([nr, nc], |idx| {
            let j = match idx[1] {
                j if j == c1 => c2,
                j if j == c2 => c1,
                j => j,
            };
            self.data[[idx[0], j]]
        });
        self.commit(data)
    }

    /// Row-major copy of the table
    pub fn to_rows(&self) -> Result<Vec<Vec<f64>>> {
        self.require_data()?;
        Ok(self.rows_unchecked())
    }

    pub(crate) fn rows_unchecked(&self) -> Vec<Vec<f64>> {
        (0..self.num_rows)
            .map(|i| (0..self.num_cols).map(|j| self.data[[i, j]]).collect())
            .collect()
    }

    /// Render with a fixed number of decimals per element
    pub fn format_with(&self, precision: usize) -> String {
        let mut out = String::new();
        for row in self.rows_unchecked() {
            let parts: Vec<String> = row.iter().map(|x| format!("{:.*}", precision, x)).collect();
            out.push_str(&format!("[{}]\n", parts.join(", ")));
        }
        out
    }
}

fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::invalid(format!(
            "Matrix dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }
    Ok(())
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.num_rows == other.num_rows
            && self.num_cols == other.num_cols
            && (0..self.num_rows)
                .all(|i| (0..self.num_cols).all(|j| self.data[[i, j]] == other.data[[i, j]]))
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl TryFrom<&[Vec<f64>]> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: &[Vec<f64>]) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows_unchecked() {
            let parts: Vec<String> = row.iter().map(|x| x.to_string()).collect();
            writeln!(f, "[{}]", parts.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;
