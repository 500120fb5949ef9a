//! # densemat: dense matrix and vector primitives
//!
//! A small numeric engine built around a rectangular [`Matrix`] of `f64` with
//! cached statistics, Gaussian elimination with partial pivoting for the
//! determinant, inversion and linear solves, and an iterative-refinement
//! solver whose residuals are accumulated in double-double precision.
//!
//! The [`tuple`] and [`vector`] modules provide the supporting sequence and
//! geometry types, and [`handlers`] exposes the eight table-in/table-out
//! operations a request dispatcher needs.

pub mod error;
pub mod handlers;
pub mod matrix;
pub mod precision;
pub mod tuple;
pub mod vector;

pub use error::{MatrixError, Result};
pub use handlers::Operation;
pub use matrix::{Matrix, RefinementConfig, DEFAULT_EPSILON};
pub use precision::{Precision, TwoFloatPrecision};
pub use tuple::{CompactedTuple, Tuple};
pub use vector::{AnyVector, Components, DistanceMetric, FixedVector, Vector, Vector2, Vector3};

// Re-export the storage type so callers can build tables without naming mdarray
pub use mdarray::DTensor;
