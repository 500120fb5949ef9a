//! Common test utilities

#![allow(dead_code)]

use densemat::Matrix;

/// Simple deterministic pseudo-random number generator (LCG)
///
/// Uses the Numerical Recipes parameters a = 1664525, c = 1013904223.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next f64 in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Map to [0, 1) using upper 48 bits
        ((self.state >> 16) as f64) / ((1u64 << 48) as f64)
    }

    /// Next f64 in [lo, hi)
    pub fn next_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Install the test logger once; later calls are no-ops
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `rows x cols` table with entries uniform in [-1, 1)
pub fn random_rows(rng: &mut SimpleRng, rows: usize, cols: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.next_in(-1.0, 1.0)).collect())
        .collect()
}

pub fn random_matrix(rng: &mut SimpleRng, rows: usize, cols: usize) -> Matrix {
    Matrix::from_rows(&random_rows(rng, rows, cols)).unwrap()
}

/// Random square matrix made diagonally dominant, hence safely non-singular
pub fn random_well_conditioned(rng: &mut SimpleRng, n: usize) -> Matrix {
    let mut rows = random_rows(rng, n, n);
    for (i, row) in rows.iter_mut().enumerate() {
        row[i] += n as f64;
    }
    Matrix::from_rows(&rows).unwrap()
}

/// `n x n` Hilbert matrix `h[i][j] = 1 / (i + j + 1)`
pub fn hilbert(n: usize) -> Matrix {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| 1.0 / (i + j + 1) as f64).collect())
        .collect();
    Matrix::from_rows(&rows).unwrap()
}

/// Largest absolute element-wise difference between two equally shaped matrices
pub fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
    let (ra, rb) = (a.to_rows().unwrap(), b.to_rows().unwrap());
    assert_eq!(ra.len(), rb.len());
    ra.iter()
        .zip(&rb)
        .flat_map(|(x, y)| x.iter().zip(y).map(|(p, q)| (p - q).abs()))
        .fold(0.0, f64::max)
}
