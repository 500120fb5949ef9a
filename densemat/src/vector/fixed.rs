//! Fixed-arity 2D and 3D vectors
//!
//! Construction from a slice, a [`Tuple`] or a [`Vector`] fails with
//! `InvalidArgument` when the element count does not match the arity.

use super::{write_components, Components, Vector};
use crate::error::{MatrixError, Result};
use crate::tuple::Tuple;

/// Vector types whose arity is part of the type
pub trait FixedVector: Components + Sized {
    const DIM: usize;

    /// Build from a slice of exactly `DIM` elements
    fn from_slice(data: &[f64]) -> Result<Self>;
}

fn arity_error(expected: usize, got: usize) -> MatrixError {
    MatrixError::invalid(format!(
        "Expected exactly {} elements for a {}D vector, got {}",
        expected, expected, got
    ))
}

/// 2D vector with `x` and `y` components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    data: [f64; 2],
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { data: [x, y] }
    }

    pub fn x(&self) -> f64 {
        self.data[0]
    }

    pub fn y(&self) -> f64 {
        self.data[1]
    }

    pub fn set_x(&mut self, value: f64) -> Result<()> {
        self.set(0, value)
    }

    pub fn set_y(&mut self, value: f64) -> Result<()> {
        self.set(1, value)
    }
}

impl Components for Vector2 {
    fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

impl FixedVector for Vector2 {
    const DIM: usize = 2;

    fn from_slice(data: &[f64]) -> Result<Self> {
        match data {
            &[x, y] => Ok(Self::new(x, y)),
            _ => Err(arity_error(Self::DIM, data.len())),
        }
    }
}

/// 3D vector with `x`, `y` and `z` components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    data: [f64; 3],
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    pub fn x(&self) -> f64 {
        self.data[0]
    }

    pub fn y(&self) -> f64 {
        self.data[1]
    }

    pub fn z(&self) -> f64 {
        self.data[2]
    }

    pub fn set_x(&mut self, value: f64) -> Result<()> {
        self.set(0, value)
    }

    pub fn set_y(&mut self, value: f64) -> Result<()> {
        self.set(1, value)
    }

    pub fn set_z(&mut self, value: f64) -> Result<()> {
        self.set(2, value)
    }
}

impl Components for Vector3 {
    fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

impl FixedVector for Vector3 {
    const DIM: usize = 3;

    fn from_slice(data: &[f64]) -> Result<Self> {
        match data {
            &[x, y, z] => Ok(Self::new(x, y, z)),
            _ => Err(arity_error(Self::DIM, data.len())),
        }
    }
}

macro_rules! impl_fixed_conversions {
    ($ty:ty) => {
        impl TryFrom<&[f64]> for $ty {
            type Error = MatrixError;

            fn try_from(data: &[f64]) -> Result<Self> {
                <$ty as FixedVector>::from_slice(data)
            }
        }

        impl TryFrom<&Tuple> for $ty {
            type Error = MatrixError;

            fn try_from(tuple: &Tuple) -> Result<Self> {
                <$ty as FixedVector>::from_slice(tuple.data())
            }
        }

        impl TryFrom<&Vector> for $ty {
            type Error = MatrixError;

            fn try_from(v: &Vector) -> Result<Self> {
                <$ty as FixedVector>::from_slice(v.data())
            }
        }

        impl From<$ty> for Vector {
            fn from(v: $ty) -> Vector {
                Vector::new(v.as_slice().to_vec())
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write_components(f, self.as_slice())
            }
        }
    };
}

impl_fixed_conversions!(Vector2);
impl_fixed_conversions!(Vector3);
