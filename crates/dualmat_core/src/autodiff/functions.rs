use super::Dual;
use crate::traits::Scalar;

impl<T: Scalar, const N: usize> Dual<T, N> {
    // --- Elementary functions ---

    /// d/da sqrt(a) = 1 / (2 sqrt(a))
    #[inline]
    pub fn sqrt(self) -> Self {
        let real = self.value.sqrt();
        self.chain(real, T::one() / (real + real))
    }

    #[inline]
    pub fn sin(self) -> Self {
        self.chain(self.value.sin(), self.value.cos())
    }

    #[inline]
    pub fn cos(self) -> Self {
        self.chain(self.value.cos(), -self.value.sin())
    }

    /// d/da tan(a) = 1 + tan(a)^2, reusing the primal tangent.
    #[inline]
    pub fn tan(self) -> Self {
        let real = self.value.tan();
        self.chain(real, T::one() + real * real)
    }

    #[inline]
    pub fn asin(self) -> Self {
        let d = T::one() / (T::one() - self.value * self.value).sqrt();
        self.chain(self.value.asin(), d)
    }

    #[inline]
    pub fn acos(self) -> Self {
        let d = -T::one() / (T::one() - self.value * self.value).sqrt();
        self.chain(self.value.acos(), d)
    }

    #[inline]
    pub fn atan(self) -> Self {
        let d = T::one() / (T::one() + self.value * self.value);
        self.chain(self.value.atan(), d)
    }

    /// Quadrant-correct arctangent of `self / other`.
    ///
    /// The derivative is that of atan(a / b):
    /// `(a' b - a b') / (a^2 + b^2)`.
    #[inline]
    pub fn atan2(self, other: Self) -> Self {
        let denom = self.value * self.value + other.value * other.value;
        Self::new(
            self.value.atan2(other.value),
            self.derivative
                .zip_map(&other.derivative, |da, db| {
                    (da * other.value - self.value * db) / denom
                }),
        )
    }

    // --- Selection ---
    // The result is a copy of the chosen operand, derivative included.

    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.value >= other.value {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.value < other.value {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn abs(self) -> Self {
        if self.value >= T::zero() {
            self
        } else {
            -self
        }
    }

    // --- Piecewise constant ---

    #[inline]
    pub fn ceil(self) -> Self {
        Self::constant(self.value.ceil())
    }

    #[inline]
    pub fn floor(self) -> Self {
        Self::constant(self.value.floor())
    }

    /// Floored modulo `a - floor(a / m) * m` with a constant modulus.
    ///
    /// The result takes the sign of `modulus`. The derivative is `self`'s, since the floor term is
    /// locally constant.
    #[inline]
    pub fn fmod(self, modulus: T) -> Self {
        Self::new(
            self.value - (self.value / modulus).floor() * modulus,
            self.derivative,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Dual;
    use nalgebra::SVector;

    fn close32(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn sqrt_chain_rule() {
        let x = Dual::<f64, 1>::variable(4.0, 0);
        let s = x.sqrt();
        assert_eq!(s.value, 2.0);
        assert_eq!(s.derivative[0], 0.25);

        let a = Dual::<f32, 1>::variable(3.0, 0);
        assert!(close32(a.sqrt().value, 3.0f32.sqrt()));
        assert!(close32(a.sqrt().derivative[0], 1.0 / 12.0f32.sqrt()));
    }

    #[test]
    fn trig_derivatives_at_zero() {
        let x = Dual::<f64, 1>::variable(0.0, 0);
        assert_eq!(x.sin().derivative[0], 1.0);
        assert_eq!(x.cos().derivative[0], 0.0);
        assert_eq!(x.tan().derivative[0], 1.0);
    }

    #[test]
    fn trig_derivatives_at_three() {
        let a = Dual::<f32, 1>::variable(3.0, 0);
        assert!(close32(a.sin().value, 3.0f32.sin()));
        assert!(close32(a.sin().derivative[0], 3.0f32.cos()));
        assert!(close32(a.cos().value, 3.0f32.cos()));
        assert!(close32(a.cos().derivative[0], -3.0f32.sin()));
        let t = 3.0f32.tan();
        assert!(close32(a.tan().value, t));
        assert!(close32(a.tan().derivative[0], 1.0 + t * t));
    }

    #[test]
    fn inverse_trig_derivatives() {
        let c = Dual::<f32, 1>::variable(0.3, 0);
        let root = (1.0f32 - 0.3 * 0.3).sqrt();

        assert!(close32(c.asin().value, 0.3f32.asin()));
        assert!(close32(c.asin().derivative[0], 1.0 / root));

        assert!(close32(c.acos().derivative[0], -1.0 / root));

        assert!(close32(c.atan().value, 0.3f32.atan()));
        assert!(close32(c.atan().derivative[0], 1.0 / (1.0 + 0.3 * 0.3)));
    }

    #[test]
    fn acos_primal_is_arccosine_not_arcsine() {
        let c = Dual::<f64, 1>::variable(0.3, 0);
        assert_eq!(c.acos().value, 0.3f64.acos());
        assert_ne!(c.acos().value, 0.3f64.asin());
        assert!((c.acos().value + c.asin().value - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn atan_derivative_is_one_over_one_plus_square() {
        for a in [-2.0, 0.0, 0.5, 3.0] {
            let t = Dual::<f64, 1>::variable(a, 0).atan();
            assert!((t.derivative[0] - 1.0 / (1.0 + a * a)).abs() < 1e-12);
            if a != 0.0 {
                assert!((t.derivative[0] - 1.0 / (1.0 + a * a).sqrt()).abs() > 1e-3);
            }
        }
    }

    #[test]
    fn atan2_matches_atan_of_quotient_for_constant_denominator() {
        let a = Dual::<f32, 1>::variable(3.0, 0);
        let b = Dual::<f32, 1>::variable(6.0, 0);
        assert!(close32(a.atan2(b).value, 3.0f32.atan2(6.0)));

        let lhs = a.atan2(Dual::constant(b.value));
        let rhs = (a / b.value).atan();
        assert!(close32(lhs.value, rhs.value));
        assert!(close32(lhs.derivative[0], rhs.derivative[0]));
    }

    #[test]
    fn atan2_partials_and_quadrants() {
        let y = Dual::<f64, 2>::variable(1.0, 0);
        let x = Dual::<f64, 2>::variable(-1.0, 1);
        let angle = y.atan2(x);
        assert!((angle.value - 3.0 * std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        // d/dy = x / r^2, d/dx = -y / r^2
        assert!((angle.derivative[0] + 0.5).abs() < 1e-12);
        assert!((angle.derivative[1] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn max_min_select_whole_operand() {
        let a = Dual::<f64, 2>::variable(5.0, 0);
        let b = Dual::<f64, 2>::variable(3.0, 1);

        let hi = a.max(b);
        assert_eq!(hi, a);
        assert_eq!(hi.derivative.as_slice(), &[1.0, 0.0]);

        let lo = a.min(b);
        assert_eq!(lo, b);
        assert_eq!(lo.derivative.as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn max_min_ties_pick_fixed_operand() {
        let a = Dual::<f64, 2>::variable(2.0, 0);
        let b = Dual::<f64, 2>::variable(2.0, 1);
        assert_eq!(a.max(b), a);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn abs_reflects_negative_operands() {
        let a = Dual::<f32, 1>::variable(3.0, 0);
        assert_eq!(a, (-a).abs());
        assert_ne!(-a, a.abs());
        assert_eq!(-a, -a.abs());

        let zero = Dual::<f32, 1>::variable(0.0, 0);
        assert_eq!(zero.abs(), zero);
    }

    #[test]
    fn rounding_has_zero_derivative() {
        let c = Dual::<f32, 1>::variable(1.5, 0);
        assert_eq!(c.ceil().value, 2.0);
        assert_eq!(c.ceil().derivative[0], 0.0);
        assert_eq!(c.floor().value, 1.0);
        assert_eq!(c.floor().derivative[0], 0.0);
    }

    #[test]
    fn fmod_keeps_operand_derivative() {
        let a = Dual::<f32, 1>::variable(3.0, 0);
        let r = a.fmod(0.8);
        assert!(close32(r.value, 3.0f32 % 0.8));
        assert_eq!(r.derivative, a.derivative);

        let d = Dual::new(-1.0, SVector::<f64, 2>::new(2.0, -3.0));
        let r = d.fmod(3.0);
        assert_eq!(r.value, 2.0);
        assert_eq!(r.derivative, d.derivative);
    }

    #[test]
    fn domain_violations_propagate_nan() {
        let neg = Dual::<f64, 2>::variable(-1.0, 0);
        let s = neg.sqrt();
        assert!(s.is_nan());
        assert!(s.derivative[0].is_nan());

        let big = Dual::<f64, 2>::variable(2.0, 1);
        for out in [big.asin(), big.acos()] {
            assert!(out.is_nan());
            assert!(out.derivative[1].is_nan());
        }
    }

    #[test]
    fn sqrt_at_zero_has_infinite_slope() {
        let z = Dual::<f64, 1>::variable(0.0, 0);
        let s = z.sqrt();
        assert_eq!(s.value, 0.0);
        assert_eq!(s.derivative[0], f64::INFINITY);
    }
}
