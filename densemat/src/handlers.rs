//! Table-in/table-out entry points
//!
//! Each handler validates raw row-major tables into core types, runs one
//! core operation and hands back the raw result. Errors from the core are
//! returned unchanged.

use std::fmt;
use std::str::FromStr;

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// `left + right`
pub fn add(left: &[Vec<f64>], right: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let mut a = Matrix::from_rows(left)?;
    a.add(&Matrix::from_rows(right)?)?;
    a.to_rows()
}

/// `left - right`
pub fn sub(left: &[Vec<f64>], right: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let mut a = Matrix::from_rows(left)?;
    a.sub(&Matrix::from_rows(right)?)?;
    a.to_rows()
}

/// `left * right`
pub fn multiply(left: &[Vec<f64>], right: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let mut a = Matrix::from_rows(left)?;
    a.multiply(&Matrix::from_rows(right)?)?;
    a.to_rows()
}

pub fn transpose(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let mut a = Matrix::from_rows(matrix)?;
    a.transpose()?;
    a.to_rows()
}

pub fn determinant(matrix: &[Vec<f64>]) -> Result<f64> {
    Matrix::from_rows(matrix)?.determinant()
}

pub fn invert(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let mut a = Matrix::from_rows(matrix)?;
    a.invert()?;
    a.to_rows()
}

/// `x` with `matrix * x = vector`
pub fn solve(matrix: &[Vec<f64>], vector: &[f64]) -> Result<Vec<f64>> {
    let a = Matrix::from_rows(matrix)?;
    Ok(Matrix::solve(&a, &Vector::from(vector))?.into_vec())
}

/// [`solve`] with iterative refinement
pub fn solve_ec(matrix: &[Vec<f64>], vector: &[f64]) -> Result<Vec<f64>> {
    let a = Matrix::from_rows(matrix)?;
    Ok(Matrix::solve_ec(&a, &Vector::from(vector))?.into_vec())
}

/// Second operand of a binary operation
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Matrix(Vec<Vec<f64>>),
    Vector(Vec<f64>),
}

/// Raw result of an operation
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Matrix(Vec<Vec<f64>>),
    Vector(Vec<f64>),
    Scalar(f64),
}

/// The operations exposed to a request dispatcher, keyed by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Multiply,
    Transpose,
    Determinant,
    Invert,
    Solve,
    SolveEc,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Add,
        Operation::Sub,
        Operation::Multiply,
        Operation::Transpose,
        Operation::Determinant,
        Operation::Invert,
        Operation::Solve,
        Operation::SolveEc,
    ];

    /// Stable routing key
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Multiply => "multiply",
            Operation::Transpose => "transpose",
            Operation::Determinant => "determinant",
            Operation::Invert => "invert",
            Operation::Solve => "solve",
            Operation::SolveEc => "solve_ec",
        }
    }

    /// Whether the operation takes a second operand
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Operation::Add | Operation::Sub | Operation::Multiply | Operation::Solve | Operation::SolveEc
        )
    }

    /// Run the operation on `left` and, for binary operations, `right`
    ///
    /// `solve` and `solve_ec` expect a vector operand, the other binary
    /// operations a matrix.
    pub fn apply(self, left: &[Vec<f64>], right: Option<&Operand>) -> Result<Output> {
        log::debug!("handling {}", self);
        match (self, right) {
            (Operation::Add, Some(Operand::Matrix(r))) => add(left, r).map(Output::Matrix),
            (Operation::Sub, Some(Operand::Matrix(r))) => sub(left, r).map(Output::Matrix),
            (Operation::Multiply, Some(Operand::Matrix(r))) => multiply(left, r).map(Output::Matrix),
            (Operation::Solve, Some(Operand::Vector(v))) => solve(left, v).map(Output::Vector),
            (Operation::SolveEc, Some(Operand::Vector(v))) => solve_ec(left, v).map(Output::Vector),
            (Operation::Transpose, None) => transpose(left).map(Output::Matrix),
            (Operation::Determinant, None) => determinant(left).map(Output::Scalar),
            (Operation::Invert, None) => invert(left).map(Output::Matrix),
            (op, _) => Err(MatrixError::invalid(format!(
                "Operand does not match operation '{}'",
                op
            ))),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| MatrixError::invalid(format!("Unknown operation '{}'", s)))
    }
}
