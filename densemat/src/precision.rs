//! Precision types used for residual accumulation
//!
//! Elimination runs in plain `f64`. The refinement solver recomputes
//! residuals `b - A x` in a wider type so that the cancellation between
//! `b` and `A x` does not swallow the correction it is trying to find.

/// Scalar type that residual sums can be accumulated in
pub trait Precision:
    From<f64>
    + Copy
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::cmp::PartialOrd
    + num_traits::Zero
    + num_traits::One
{
    /// Round back to `f64`
    fn to_f64(self) -> f64;

    fn sqrt(self) -> Self;
}

impl Precision for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn sqrt(self) -> f64 {
        f64::sqrt(self)
    }
}

// Wrapper to avoid orphan rule issues with the num_traits impls
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TwoFloatPrecision(twofloat::TwoFloat);

impl TwoFloatPrecision {
    pub fn from_f64(x: f64) -> Self {
        Self(twofloat::TwoFloat::from(x))
    }
}

impl Precision for TwoFloatPrecision {
    #[inline]
    fn to_f64(self) -> f64 {
        self.0.into()
    }

    #[inline]
    fn sqrt(self) -> TwoFloatPrecision {
        TwoFloatPrecision(self.0.sqrt())
    }
}

impl From<f64> for TwoFloatPrecision {
    fn from(x: f64) -> Self {
        Self::from_f64(x)
    }
}

impl From<TwoFloatPrecision> for f64 {
    fn from(x: TwoFloatPrecision) -> f64 {
        x.0.into()
    }
}

impl std::ops::Add for TwoFloatPrecision {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::Sub for TwoFloatPrecision {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::ops::Mul for TwoFloatPrecision {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}

impl std::ops::Div for TwoFloatPrecision {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Self(self.0 / other.0)
    }
}

impl std::ops::Neg for TwoFloatPrecision {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::ops::AddAssign for TwoFloatPrecision {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::SubAssign for TwoFloatPrecision {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl num_traits::Zero for TwoFloatPrecision {
    fn zero() -> Self {
        Self(twofloat::TwoFloat::from(0.0))
    }

    fn is_zero(&self) -> bool {
        self.0 == twofloat::TwoFloat::from(0.0)
    }
}

impl num_traits::One for TwoFloatPrecision {
    fn one() -> Self {
        Self(twofloat::TwoFloat::from(1.0))
    }
}

/// Dot product of two equal-length slices accumulated in `T`
pub fn dot<T: Precision>(a: &[f64], b: &[f64]) -> T {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = T::zero();
    for (&x, &y) in a.iter().zip(b.iter()) {
        sum += T::from(x) * T::from(y);
    }
    sum
}

/// Residual `b - A x` for a row-major `n x n` table, accumulated in `T`
/// and rounded to `f64` per component
pub fn residual<T: Precision>(rows: &[Vec<f64>], x: &[f64], b: &[f64]) -> Vec<f64> {
    rows.iter()
        .zip(b.iter())
        .map(|(row, &bi)| (T::from(bi) - dot::<T>(row, x)).to_f64())
        .collect()
}

/// Euclidean norm of a slice accumulated in `T`
pub fn norm_2<T: Precision>(v: &[f64]) -> f64 {
    Precision::sqrt(dot::<T>(v, v)).to_f64()
}
