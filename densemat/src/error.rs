//! Error type shared by every matrix, tuple and vector operation

/// Failure conditions raised by the numeric engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    /// Malformed input: ragged rows, non-finite elements, dimension mismatch,
    /// out-of-range index or wrong operand shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation attempted on an empty matrix or an empty sequence
    #[error("Uninitialized: {0}")]
    Uninitialized(String),

    /// Normalized running determinant dropped below the matrix epsilon
    #[error("Probable singular or ill-conditioned matrix, normalized determinant = {normalized_determinant:e}")]
    Singular { normalized_determinant: f64 },

    /// Pivot element is exactly zero after pivoting
    #[error("Cannot continue, pivoting element in row {row} is zero")]
    ZeroPivot { row: usize },

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

impl MatrixError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MatrixError::InvalidArgument(msg.into())
    }

    pub(crate) fn empty_matrix() -> Self {
        MatrixError::Uninitialized("Matrix has not been populated".to_string())
    }

    /// True for the two conditions raised by elimination on a (near-)singular matrix
    pub fn is_singular(&self) -> bool {
        matches!(self, MatrixError::Singular { .. } | MatrixError::ZeroPivot { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Reject NaN and infinities written into a sequence or vector
pub(crate) fn check_finite(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MatrixError::invalid(format!(
            "Error, a numeric value is needed. You used: {}",
            value
        )));
    }
    Ok(())
}
