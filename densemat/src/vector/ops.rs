//! Stateless vector algebra
//!
//! Element-wise operations accept any [`Components`] operands and return a
//! dynamic [`Vector`]. Products that only make sense for a given arity take
//! [`Vector2`]/[`Vector3`] operands, so mixing arities is a type error; use
//! the [`AnyVector`] methods when the arity is only known at runtime.

use super::{AnyVector, Components, FixedVector, Vector, Vector3};
use crate::error::{MatrixError, Result};

fn zip_with<A, B, F>(v1: &A, v2: &B, f: F) -> Result<Vector>
where
    A: Components + ?Sized,
    B: Components + ?Sized,
    F: Fn(f64, f64) -> f64,
{
    let (a, b) = (v1.as_slice(), v2.as_slice());
    if a.len() != b.len() {
        return Err(MatrixError::invalid(format!(
            "Vectors must be of the same size: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(Vector::new(a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()))
}

/// `<v1 + w1, v2 + w2, ...>`
pub fn add<A: Components + ?Sized, B: Components + ?Sized>(v1: &A, v2: &B) -> Result<Vector> {
    zip_with(v1, v2, |x, y| x + y)
}

/// `<v1 - w1, v2 - w2, ...>`
pub fn substract<A: Components + ?Sized, B: Components + ?Sized>(v1: &A, v2: &B) -> Result<Vector> {
    zip_with(v1, v2, |x, y| x - y)
}

/// Alias of [`substract`]
pub fn subtract<A: Components + ?Sized, B: Components + ?Sized>(v1: &A, v2: &B) -> Result<Vector> {
    substract(v1, v2)
}

/// Element-wise product `<v1 * w1, v2 * w2, ...>`
pub fn multiply<A: Components + ?Sized, B: Components + ?Sized>(v1: &A, v2: &B) -> Result<Vector> {
    zip_with(v1, v2, |x, y| x * y)
}

pub fn scale<A: Components + ?Sized>(factor: f64, v: &A) -> Result<Vector> {
    if !factor.is_finite() {
        return Err(MatrixError::invalid(format!("Requires a numeric factor, got {}", factor)));
    }
    Ok(Vector::new(v.as_slice().iter().map(|x| x * factor).collect()))
}

/// Element-wise quotient; fails if any element of `v2` is zero
pub fn divide<A: Components + ?Sized, B: Components + ?Sized>(v1: &A, v2: &B) -> Result<Vector> {
    let quotient = zip_with(v1, v2, |x, y| x / y)?;
    if let Some(i) = v2.as_slice().iter().position(|&d| d == 0.0) {
        return Err(MatrixError::DivisionByZero(format!("Element {} in V2 is zero", i)));
    }
    Ok(quotient)
}

/// `v . w = |v| |w| cos(theta)`
pub fn dot_product<V: FixedVector>(v1: &V, v2: &V) -> f64 {
    v1.as_slice().iter().zip(v2.as_slice()).map(|(x, y)| x * y).sum()
}

pub fn cross_product(v1: &Vector3, v2: &Vector3) -> Vector3 {
    Vector3::new(
        v1.y() * v2.z() - v1.z() * v2.y(),
        v1.z() * v2.x() - v1.x() * v2.z(),
        v1.x() * v2.y() - v1.y() * v2.x(),
    )
}

/// `v1 . (v2 x v3)`
pub fn triple_scalar_product(v1: &Vector3, v2: &Vector3, v3: &Vector3) -> f64 {
    dot_product(v1, &cross_product(v2, v3))
}

/// Angle between two vectors in radians
///
/// Both operands are normalized in place before the dot product is taken.
/// If either has zero length, neither is modified.
pub fn angle_between<V: FixedVector>(v1: &mut V, v2: &mut V) -> Result<f64> {
    if v1.length() == 0.0 || v2.length() == 0.0 {
        return Err(MatrixError::DivisionByZero(
            "cannot measure the angle to a vector of zero length".to_string(),
        ));
    }
    v1.normalize()?;
    v2.normalize()?;
    // Rounding can push the cosine of (anti)parallel unit vectors past +-1
    Ok(dot_product(v1, v2).clamp(-1.0, 1.0).acos())
}

/// Vector of `size` elements all equal to `value`
///
/// Sizes 2 and 3 produce the fixed-arity variants.
pub fn create(size: usize, value: f64) -> AnyVector {
    AnyVector::from_vec(vec![value; size])
}

pub fn create_zero(size: usize) -> AnyVector {
    create(size, 0.0)
}

pub fn create_one(size: usize) -> AnyVector {
    create(size, 1.0)
}

/// Basis vector: all zeros except a 1 at `index`
pub fn create_basis(size: usize, index: usize) -> Result<AnyVector> {
    if index >= size {
        return Err(MatrixError::invalid(format!(
            "Incorrect index for size: {} >= {}",
            index, size
        )));
    }
    let mut v = create_zero(size);
    v.set(index, 1.0)?;
    Ok(v)
}
