//! Vectors over `f64`
//!
//! All vector types expose the same capability interface, [`Components`]:
//! a slice view plus bounds-checked `get`/`set`. Geometry (length,
//! normalization, distances) is provided on top of that interface, so
//! [`Vector`], [`Vector2`] and [`Vector3`] share one implementation.
//!
//! - [`Vector`]: any size, backed by a [`Tuple`]
//! - [`Vector2`], [`Vector3`]: fixed arity, backed by arrays
//! - [`AnyVector`]: tagged variant returned by size-dispatching factories

mod fixed;
pub mod ops;

pub use fixed::{FixedVector, Vector2, Vector3};

use crate::error::{check_finite, MatrixError, Result};
use crate::tuple::Tuple;

/// Distance metrics supported by [`Components::distance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Euclidean distance
    #[default]
    Cartesian,
    /// Sum of absolute differences (a.k.a. city block)
    Manhattan,
    /// Largest absolute difference
    Chessboard,
}

impl std::str::FromStr for DistanceMetric {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cartesian" => Ok(DistanceMetric::Cartesian),
            "manhattan" | "city" => Ok(DistanceMetric::Manhattan),
            "chessboard" => Ok(DistanceMetric::Chessboard),
            other => Err(MatrixError::invalid(format!("Unknown distance type: {}", other))),
        }
    }
}

/// Capability interface shared by every vector type
pub trait Components {
    fn as_slice(&self) -> &[f64];

    fn as_mut_slice(&mut self) -> &mut [f64];

    /// Number of elements (dimensions)
    fn size(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Result<f64> {
        self.as_slice().get(index).copied().ok_or_else(|| {
            MatrixError::invalid(format!("Wrong index: {}, vector size is: {}", index, self.size()))
        })
    }

    /// Overwrite one element; the value must be finite
    fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_finite(value)?;
        let size = self.size();
        match self.as_mut_slice().get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(MatrixError::invalid(format!(
                "Wrong index: {}, vector size is: {}",
                index, size
            ))),
        }
    }

    fn length_squared(&self) -> f64 {
        self.as_slice().iter().map(|x| x * x).sum()
    }

    fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Alias of [`Components::length`]
    fn magnitude(&self) -> f64 {
        self.length()
    }

    /// Scale to unit length in place
    fn normalize(&mut self) -> Result<()> {
        let length = self.length();
        if length == 0.0 {
            return Err(MatrixError::DivisionByZero(
                "cannot normalize a vector of zero length".to_string(),
            ));
        }
        for x in self.as_mut_slice() {
            *x /= length;
        }
        Ok(())
    }

    /// Negate every element in place
    fn reverse(&mut self) {
        for x in self.as_mut_slice() {
            *x = -*x;
        }
    }

    /// Alias of [`Components::reverse`]
    fn conjugate(&mut self) {
        self.reverse();
    }

    fn scale(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() {
            return Err(MatrixError::invalid(format!("Requires a numeric factor, got {}", factor)));
        }
        for x in self.as_mut_slice() {
            *x *= factor;
        }
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.as_slice().iter().all(|&x| x == 0.0)
    }

    fn distance<V: Components + ?Sized>(&self, other: &V, metric: DistanceMetric) -> Result<f64> {
        match metric {
            DistanceMetric::Cartesian => self.cartesian_distance(other),
            DistanceMetric::Manhattan => self.manhattan_distance(other),
            DistanceMetric::Chessboard => self.chessboard_distance(other),
        }
    }

    fn cartesian_distance<V: Components + ?Sized>(&self, other: &V) -> Result<f64> {
        let sum: f64 = abs_differences(self.as_slice(), other.as_slice())?
            .map(|d| d * d)
            .sum();
        Ok(sum.sqrt())
    }

    /// `|x1 - x2| + |y1 - y2| + ...`
    fn manhattan_distance<V: Components + ?Sized>(&self, other: &V) -> Result<f64> {
        Ok(abs_differences(self.as_slice(), other.as_slice())?.sum())
    }

    /// `max(|x1 - x2|, |y1 - y2|, ...)`
    fn chessboard_distance<V: Components + ?Sized>(&self, other: &V) -> Result<f64> {
        Ok(abs_differences(self.as_slice(), other.as_slice())?.fold(0.0, f64::max))
    }
}

fn abs_differences<'a>(a: &'a [f64], b: &'a [f64]) -> Result<impl Iterator<Item = f64> + 'a> {
    if a.len() != b.len() {
        return Err(MatrixError::invalid(format!(
            "Vector has to be of the same size: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()))
}

/// Vector of any size, owning its [`Tuple`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    tuple: Tuple,
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Self {
        Self { tuple: Tuple::new(data) }
    }

    pub fn tuple(&self) -> &Tuple {
        &self.tuple
    }

    pub fn into_tuple(self) -> Tuple {
        self.tuple
    }

    pub fn data(&self) -> &[f64] {
        self.tuple.data()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.tuple.into_vec()
    }
}

impl Components for Vector {
    fn as_slice(&self) -> &[f64] {
        self.tuple.data()
    }

    fn as_mut_slice(&mut self) -> &mut [f64] {
        self.tuple.data_mut()
    }
}

impl From<Tuple> for Vector {
    fn from(tuple: Tuple) -> Self {
        Self { tuple }
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

impl From<&[f64]> for Vector {
    fn from(data: &[f64]) -> Self {
        Self::new(data.to_vec())
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_components(f, self.as_slice())
    }
}

pub(crate) fn write_components(f: &mut std::fmt::Formatter<'_>, data: &[f64]) -> std::fmt::Result {
    let parts: Vec<String> = data.iter().map(|x| x.to_string()).collect();
    write!(f, "Vector: < {} >", parts.join(", "))
}

/// A vector whose concrete arity is only known at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum AnyVector {
    Two(Vector2),
    Three(Vector3),
    Dyn(Vector),
}

impl AnyVector {
    /// Pick the fixed-arity variant when `data` has 2 or 3 elements
    pub fn from_vec(data: Vec<f64>) -> Self {
        match data.as_slice() {
            &[x, y] => AnyVector::Two(Vector2::new(x, y)),
            &[x, y, z] => AnyVector::Three(Vector3::new(x, y, z)),
            _ => AnyVector::Dyn(Vector::new(data)),
        }
    }

    pub fn into_vector(self) -> Vector {
        Vector::new(self.as_slice().to_vec())
    }

    /// Dot product of two vectors of the same fixed arity
    pub fn dot(&self, other: &AnyVector) -> Result<f64> {
        match (self, other) {
            (AnyVector::Two(a), AnyVector::Two(b)) => Ok(ops::dot_product(a, b)),
            (AnyVector::Three(a), AnyVector::Three(b)) => Ok(ops::dot_product(a, b)),
            _ => Err(same_type_error()),
        }
    }

    /// Cross product, defined for two 3-vectors only
    pub fn cross(&self, other: &AnyVector) -> Result<Vector3> {
        match (self, other) {
            (AnyVector::Three(a), AnyVector::Three(b)) => Ok(ops::cross_product(a, b)),
            _ => Err(MatrixError::invalid("Cross product requires two 3D vectors")),
        }
    }

    /// Angle in radians; normalizes both operands in place
    pub fn angle_between(&mut self, other: &mut AnyVector) -> Result<f64> {
        match (self, other) {
            (AnyVector::Two(a), AnyVector::Two(b)) => ops::angle_between(a, b),
            (AnyVector::Three(a), AnyVector::Three(b)) => ops::angle_between(a, b),
            _ => Err(same_type_error()),
        }
    }
}

fn same_type_error() -> MatrixError {
    MatrixError::invalid("Vectors must be both of the same type (2D or 3D)")
}

impl Components for AnyVector {
    fn as_slice(&self) -> &[f64] {
        match self {
            AnyVector::Two(v) => v.as_slice(),
            AnyVector::Three(v) => v.as_slice(),
            AnyVector::Dyn(v) => v.as_slice(),
        }
    }

    fn as_mut_slice(&mut self) -> &mut [f64] {
        match self {
            AnyVector::Two(v) => v.as_mut_slice(),
            AnyVector::Three(v) => v.as_mut_slice(),
            AnyVector::Dyn(v) => v.as_mut_slice(),
        }
    }
}

impl From<Vector> for AnyVector {
    fn from(v: Vector) -> Self {
        AnyVector::from_vec(v.into_vec())
    }
}

impl std::fmt::Display for AnyVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_components(f, self.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_length_and_normalize() {
        let mut v = Vector::new(vec![3.0, 4.0]);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.magnitude(), 5.0);

        v.normalize().unwrap();
        assert_abs_diff_eq!(v.data()[0], 0.6, epsilon = 1e-15);
        assert_abs_diff_eq!(v.data()[1], 0.8, epsilon = 1e-15);
        assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut v = Vector::new(vec![0.0, 0.0, 0.0]);
        assert!(matches!(v.normalize(), Err(MatrixError::DivisionByZero(_))));
        assert!(v.is_zero());
    }

    #[test]
    fn test_distances() {
        let a = Vector::new(vec![0.0, 0.0]);
        let b = Vector::new(vec![3.0, 4.0]);
        assert_eq!(a.distance(&b, DistanceMetric::Cartesian).unwrap(), 5.0);
        assert_eq!(a.distance(&b, DistanceMetric::Manhattan).unwrap(), 7.0);
        assert_eq!(a.distance(&b, DistanceMetric::Chessboard).unwrap(), 4.0);

        let c = Vector::new(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            a.distance(&c, DistanceMetric::Cartesian),
            Err(MatrixError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_distance_across_vector_types() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector::new(vec![3.0, 4.0]);
        assert_eq!(a.distance(&b, DistanceMetric::default()).unwrap(), 5.0);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("city".parse::<DistanceMetric>().unwrap(), DistanceMetric::Manhattan);
        assert_eq!("Chessboard".parse::<DistanceMetric>().unwrap(), DistanceMetric::Chessboard);
        assert!("hamming".parse::<DistanceMetric>().is_err());
    }

    #[test]
    fn test_reverse_scale_get_set() {
        let mut v = Vector::new(vec![1.0, -2.0, 3.0]);
        v.reverse();
        assert_eq!(v.data(), &[-1.0, 2.0, -3.0]);
        v.conjugate();
        v.scale(2.0).unwrap();
        assert_eq!(v.data(), &[2.0, -4.0, 6.0]);
        assert!(v.scale(f64::INFINITY).is_err());

        v.set(1, 10.0).unwrap();
        assert_eq!(v.get(1).unwrap(), 10.0);
        assert!(v.get(3).is_err());
        assert!(v.set(3, 0.0).is_err());
        assert!(matches!(v.set(0, f64::NAN), Err(MatrixError::InvalidArgument(_))));
        assert_eq!(v.get(0).unwrap(), 2.0);
    }

    #[test]
    fn test_any_vector_dispatch() {
        assert!(matches!(AnyVector::from_vec(vec![1.0, 2.0]), AnyVector::Two(_)));
        assert!(matches!(AnyVector::from_vec(vec![1.0, 2.0, 3.0]), AnyVector::Three(_)));
        assert!(matches!(AnyVector::from_vec(vec![1.0]), AnyVector::Dyn(_)));

        let a = AnyVector::from_vec(vec![1.0, 2.0]);
        let b = AnyVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert!(matches!(a.dot(&b), Err(MatrixError::InvalidArgument(_))));
        assert!(a.cross(&a).is_err());
        assert_eq!(a.dot(&a).unwrap(), 5.0);
        assert_eq!(b.cross(&b).unwrap(), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector::new(vec![1.0, 2.5]).to_string(), "Vector: < 1, 2.5 >");
    }
}
