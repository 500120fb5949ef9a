//! Dense real matrices

mod arith;
mod base;
mod det;
mod linear;

pub use base::{Matrix, DEFAULT_EPSILON};
pub use linear::RefinementConfig;
