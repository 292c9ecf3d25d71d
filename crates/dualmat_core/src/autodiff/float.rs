use super::Dual;
use crate::traits::Scalar;
use num_traits::{Float, FromPrimitive, Num, NumCast, One, ToPrimitive, Zero};
use std::num::FpCategory;

// Implement the num_traits stack so Dual satisfies Scalar and can flow through generic numeric
// code. Functions with a closed-form derivative get one; rounding-style functions are flat.

/// Converts an f64 constant into `T`, falling back to NaN if it is not representable.
#[inline]
fn lift<T: Scalar>(x: f64) -> T {
    T::from_f64(x).unwrap_or_else(T::nan)
}

impl<T: Scalar, const N: usize> Zero for Dual<T, N> {
    fn zero() -> Self {
        Self::constant(T::zero())
    }
    fn is_zero(&self) -> bool {
        self.value.is_zero() && self.derivative.iter().all(|d| d.is_zero())
    }
}

impl<T: Scalar, const N: usize> One for Dual<T, N> {
    fn one() -> Self {
        Self::constant(T::one())
    }
}

impl<T: Scalar, const N: usize> Num for Dual<T, N> {
    type FromStrRadixErr = <T as Num>::FromStrRadixErr;
    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        T::from_str_radix(str, radix).map(Self::constant)
    }
}

impl<T: Scalar, const N: usize> ToPrimitive for Dual<T, N> {
    fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }
    fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }
    fn to_f32(&self) -> Option<f32> {
        self.value.to_f32()
    }
    fn to_f64(&self) -> Option<f64> {
        self.value.to_f64()
    }
}

impl<T: Scalar, const N: usize> FromPrimitive for Dual<T, N> {
    fn from_i64(n: i64) -> Option<Self> {
        T::from_i64(n).map(Self::constant)
    }
    fn from_u64(n: u64) -> Option<Self> {
        T::from_u64(n).map(Self::constant)
    }
    fn from_f32(n: f32) -> Option<Self> {
        T::from_f32(n).map(Self::constant)
    }
    fn from_f64(n: f64) -> Option<Self> {
        T::from_f64(n).map(Self::constant)
    }
}

impl<T: Scalar, const N: usize> NumCast for Dual<T, N> {
    fn from<U: ToPrimitive>(n: U) -> Option<Self> {
        <T as NumCast>::from(n).map(Self::constant)
    }
}

impl<T: Scalar, const N: usize> Float for Dual<T, N> {
    fn nan() -> Self {
        Self::constant(T::nan())
    }
    fn infinity() -> Self {
        Self::constant(T::infinity())
    }
    fn neg_infinity() -> Self {
        Self::constant(T::neg_infinity())
    }
    fn neg_zero() -> Self {
        Self::constant(T::neg_zero())
    }
    fn min_value() -> Self {
        Self::constant(T::min_value())
    }
    fn min_positive_value() -> Self {
        Self::constant(T::min_positive_value())
    }
    fn epsilon() -> Self {
        Self::constant(T::epsilon())
    }
    fn max_value() -> Self {
        Self::constant(T::max_value())
    }
    fn is_nan(self) -> bool {
        Dual::is_nan(self)
    }
    fn is_infinite(self) -> bool {
        Dual::is_infinite(self)
    }
    fn is_finite(self) -> bool {
        Dual::is_finite(self)
    }
    fn is_normal(self) -> bool {
        self.value.is_normal()
    }
    fn classify(self) -> FpCategory {
        self.value.classify()
    }
    fn floor(self) -> Self {
        Dual::floor(self)
    }
    fn ceil(self) -> Self {
        Dual::ceil(self)
    }
    fn round(self) -> Self {
        Self::constant(self.value.round())
    }
    fn trunc(self) -> Self {
        Self::constant(self.value.trunc())
    }
    fn fract(self) -> Self {
        Self::new(self.value.fract(), self.derivative)
    }
    fn abs(self) -> Self {
        Dual::abs(self)
    }
    fn signum(self) -> Self {
        Self::constant(self.value.signum())
    }
    fn is_sign_positive(self) -> bool {
        self.value.is_sign_positive()
    }
    fn is_sign_negative(self) -> bool {
        self.value.is_sign_negative()
    }
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
    fn recip(self) -> Self {
        let inv = T::one() / self.value;
        self.chain(inv, -inv * inv)
    }

    fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::constant(T::one());
        }
        let exponent = T::from_i32(n).unwrap_or_else(T::nan);
        let real = self.value.powi(n);
        // n - 1 overflows at i32::MIN.
        let below = match n.checked_sub(1) {
            Some(m) => self.value.powi(m),
            None => real / self.value,
        };
        self.chain(real, exponent * below)
    }

    fn powf(self, n: Self) -> Self {
        // d(a^b) = b a^(b-1) da + a^b ln(a) db; a zero partial skips its term so a constant
        // exponent on a negative base stays finite.
        let real = self.value.powf(n.value);
        let d_base = n.value * self.value.powf(n.value - T::one());
        let d_exponent = real * self.value.ln();
        Self::new(
            real,
            self.derivative.zip_map(&n.derivative, |da, dn| {
                let mut d = T::zero();
                if !da.is_zero() {
                    d = d + da * d_base;
                }
                if !dn.is_zero() {
                    d = d + dn * d_exponent;
                }
                d
            }),
        )
    }

    fn sqrt(self) -> Self {
        Dual::sqrt(self)
    }

    fn exp(self) -> Self {
        let e = self.value.exp();
        self.chain(e, e)
    }
    fn exp2(self) -> Self {
        let real = self.value.exp2();
        let ln_2 = (T::one() + T::one()).ln();
        self.chain(real, real * ln_2)
    }
    fn ln(self) -> Self {
        self.chain(self.value.ln(), T::one() / self.value)
    }
    fn log(self, base: Self) -> Self {
        self.ln() / base.ln()
    }
    fn log2(self) -> Self {
        let ln_2 = (T::one() + T::one()).ln();
        self.chain(self.value.log2(), T::one() / (self.value * ln_2))
    }
    fn log10(self) -> Self {
        let ln_10 = lift::<T>(std::f64::consts::LN_10);
        self.chain(self.value.log10(), T::one() / (self.value * ln_10))
    }
    fn to_degrees(self) -> Self {
        self.chain(self.value.to_degrees(), lift(180.0 / std::f64::consts::PI))
    }
    fn to_radians(self) -> Self {
        self.chain(self.value.to_radians(), lift(std::f64::consts::PI / 180.0))
    }

    fn max(self, other: Self) -> Self {
        Dual::max(self, other)
    }
    fn min(self, other: Self) -> Self {
        Dual::min(self, other)
    }

    fn abs_sub(self, other: Self) -> Self {
        if self.value <= other.value {
            Self::constant(T::zero())
        } else {
            self - other
        }
    }

    fn cbrt(self) -> Self {
        let real = self.value.cbrt();
        let three = lift::<T>(3.0);
        self.chain(real, T::one() / (three * real * real))
    }
    fn hypot(self, other: Self) -> Self {
        let h = self.value.hypot(other.value);
        Self::new(
            h,
            self.derivative.zip_map(&other.derivative, |da, db| {
                (self.value * da + other.value * db) / h
            }),
        )
    }

    fn sin(self) -> Self {
        Dual::sin(self)
    }
    fn cos(self) -> Self {
        Dual::cos(self)
    }
    fn tan(self) -> Self {
        Dual::tan(self)
    }
    fn asin(self) -> Self {
        Dual::asin(self)
    }
    fn acos(self) -> Self {
        Dual::acos(self)
    }
    fn atan(self) -> Self {
        Dual::atan(self)
    }
    fn atan2(self, other: Self) -> Self {
        Dual::atan2(self, other)
    }
    fn sin_cos(self) -> (Self, Self) {
        (Dual::sin(self), Dual::cos(self))
    }

    fn exp_m1(self) -> Self {
        self.chain(self.value.exp_m1(), self.value.exp())
    }
    fn ln_1p(self) -> Self {
        self.chain(self.value.ln_1p(), T::one() / (T::one() + self.value))
    }
    fn sinh(self) -> Self {
        self.chain(self.value.sinh(), self.value.cosh())
    }
    fn cosh(self) -> Self {
        self.chain(self.value.cosh(), self.value.sinh())
    }
    fn tanh(self) -> Self {
        let t = self.value.tanh();
        self.chain(t, T::one() - t * t)
    }
    fn asinh(self) -> Self {
        let d = T::one() / (self.value * self.value + T::one()).sqrt();
        self.chain(self.value.asinh(), d)
    }
    fn acosh(self) -> Self {
        let d = T::one() / (self.value * self.value - T::one()).sqrt();
        self.chain(self.value.acosh(), d)
    }
    fn atanh(self) -> Self {
        let d = T::one() / (T::one() - self.value * self.value);
        self.chain(self.value.atanh(), d)
    }

    fn integer_decode(self) -> (u64, i16, i8) {
        self.value.integer_decode()
    }
}
