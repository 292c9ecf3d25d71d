use crate::traits::Scalar;
use nalgebra::SVector;
use std::cmp::Ordering;

mod float;
mod functions;
mod ops;

/// Dual number for forward-mode AD with `N` tracked inputs.
/// value: primal part
/// derivative: partials of `value` with respect to each tracked input
///
/// The derivative lives in a stack-allocated `SVector`, so a `Dual` is `Copy` and can be used
/// as the element type of nalgebra vectors and matrices. Combining duals of different widths is
/// a type error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<T: Scalar, const N: usize> {
    pub value: T,
    pub derivative: SVector<T, N>,
}

impl<T: Scalar, const N: usize> Dual<T, N> {
    /// Number of tracked inputs.
    pub const WIDTH: usize = N;

    /// Seed index that never names a tracked input; `variable(v, NO_INPUT)` is a constant.
    pub const NO_INPUT: usize = usize::MAX;

    /// Builds a dual from an explicit value and derivative vector.
    #[inline]
    pub fn new(value: T, derivative: SVector<T, N>) -> Self {
        Self { value, derivative }
    }

    /// A value with no dependence on any tracked input.
    #[inline]
    pub fn constant(value: T) -> Self {
        Self::new(value, SVector::zeros())
    }

    /// Declares `value` as tracked input `index`.
    ///
    /// The derivative is the unit vector at `index`. An index outside `0..N` yields an all-zero
    /// derivative, i.e. the result behaves as a constant.
    #[inline]
    pub fn variable(value: T, index: usize) -> Self {
        let mut derivative = SVector::<T, N>::zeros();
        if index < N {
            derivative[index] = T::one();
        }
        Self::new(value, derivative)
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn derivative(&self) -> &SVector<T, N> {
        &self.derivative
    }

    /// Partial derivative with respect to input `index`, or `None` if `index >= N`.
    #[inline]
    pub fn partial(&self, index: usize) -> Option<T> {
        self.derivative.get(index).copied()
    }

    /// Unary plus.
    #[inline]
    pub fn pos(self) -> Self {
        self
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.value.is_nan()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self.value.is_infinite()
    }

    /// Applies the chain rule: the result has primal `value` and derivative
    /// `multiplier * self.derivative`.
    #[inline]
    pub(crate) fn chain(&self, value: T, multiplier: T) -> Self {
        Self::new(value, self.derivative.map(|d| multiplier * d))
    }
}

impl<T: Scalar, const N: usize> Default for Dual<T, N> {
    fn default() -> Self {
        Self::constant(T::zero())
    }
}

impl<T: Scalar, const N: usize> From<T> for Dual<T, N> {
    fn from(value: T) -> Self {
        Self::constant(value)
    }
}

/// Orders by primal value only, so duals with equal values compare `Equal` even when `!=`.
impl<T: Scalar, const N: usize> PartialOrd for Dual<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
