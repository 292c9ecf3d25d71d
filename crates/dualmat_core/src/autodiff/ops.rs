use super::Dual;
use crate::traits::Scalar;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

// --- Dual op Dual ---

impl<T: Scalar, const N: usize> Neg for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value, self.derivative.map(|d| -d))
    }
}

impl<T: Scalar, const N: usize> Add for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.value + rhs.value,
            self.derivative.zip_map(&rhs.derivative, |a, b| a + b),
        )
    }
}

impl<T: Scalar, const N: usize> Sub for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<T: Scalar, const N: usize> Mul for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.derivative
                .zip_map(&rhs.derivative, |da, db| self.value * db + rhs.value * da),
        )
    }
}

impl<T: Scalar, const N: usize> Div for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        // One reciprocal serves both the value and the quotient rule.
        let inv = T::one() / rhs.value;
        Self::new(
            self.value * inv,
            self.derivative
                .zip_map(&rhs.derivative, |da, db| da * inv - self.value * db * inv * inv),
        )
    }
}

impl<T: Scalar, const N: usize> Rem for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: Self) -> Self {
        // a % b == a - trunc(a / b) * b, with the quotient locally constant.
        let quotient = (self.value / rhs.value).trunc();
        Self::new(
            self.value % rhs.value,
            self.derivative
                .zip_map(&rhs.derivative, |da, db| da - quotient * db),
        )
    }
}

// --- Dual op scalar ---

impl<T: Scalar, const N: usize> Add<T> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: T) -> Self {
        Self::new(self.value + rhs, self.derivative)
    }
}

impl<T: Scalar, const N: usize> Sub<T> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: T) -> Self {
        self + (-rhs)
    }
}

impl<T: Scalar, const N: usize> Mul<T> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        self.chain(self.value * rhs, rhs)
    }
}

impl<T: Scalar, const N: usize> Div<T> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: T) -> Self {
        self * (T::one() / rhs)
    }
}

impl<T: Scalar, const N: usize> Rem<T> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: T) -> Self {
        Self::new(self.value % rhs, self.derivative)
    }
}

// --- scalar op Dual ---

macro_rules! scalar_lhs_ops {
    ($($scalar:ty),*) => {$(
        impl<const N: usize> Add<Dual<$scalar, N>> for $scalar {
            type Output = Dual<$scalar, N>;
            #[inline]
            fn add(self, rhs: Dual<$scalar, N>) -> Dual<$scalar, N> {
                rhs + self
            }
        }

        impl<const N: usize> Sub<Dual<$scalar, N>> for $scalar {
            type Output = Dual<$scalar, N>;
            #[inline]
            fn sub(self, rhs: Dual<$scalar, N>) -> Dual<$scalar, N> {
                -rhs + self
            }
        }

        impl<const N: usize> Mul<Dual<$scalar, N>> for $scalar {
            type Output = Dual<$scalar, N>;
            #[inline]
            fn mul(self, rhs: Dual<$scalar, N>) -> Dual<$scalar, N> {
                rhs * self
            }
        }

        impl<const N: usize> Div<Dual<$scalar, N>> for $scalar {
            type Output = Dual<$scalar, N>;
            #[inline]
            fn div(self, rhs: Dual<$scalar, N>) -> Dual<$scalar, N> {
                let inv = 1.0 / rhs.value;
                rhs.chain(self * inv, -self * inv * inv)
            }
        }
    )*};
}

scalar_lhs_ops!(f32, f64);

// --- compound assignment ---

macro_rules! assign_ops {
    ($($trait:ident, $method:ident, $op:tt);* $(;)?) => {$(
        impl<T: Scalar, const N: usize> $trait for Dual<T, N> {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }

        impl<T: Scalar, const N: usize> $trait<T> for Dual<T, N> {
            #[inline]
            fn $method(&mut self, rhs: T) {
                *self = *self $op rhs;
            }
        }
    )*};
}

assign_ops! {
    AddAssign, add_assign, +;
    SubAssign, sub_assign, -;
    MulAssign, mul_assign, *;
    DivAssign, div_assign, /;
    RemAssign, rem_assign, %;
}

impl<T: Scalar, const N: usize> Sum for Dual<T, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::constant(T::zero()), |acc, x| acc + x)
    }
}

impl<T: Scalar, const N: usize> Product for Dual<T, N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::constant(T::one()), |acc, x| acc * x)
    }
}
