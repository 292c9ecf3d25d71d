use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars throughout the crate.
/// Must support basic arithmetic, debug printing, and conversion from f64.
///
/// Both plain floats and [`Dual`](crate::autodiff::Dual) numbers satisfy it, which is what
/// lets a single generic function be evaluated for values and for derivatives.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Represents a vector-valued function f: R^n -> R^m.
pub trait VectorFunction<T: Scalar> {
    /// Returns n, the number of inputs.
    fn input_dimension(&self) -> usize;

    /// Returns m, the number of outputs.
    fn output_dimension(&self) -> usize;

    /// Evaluates the function.
    /// x: input point (length n)
    /// out: buffer to write f(x) into (length m)
    fn apply(&self, x: &[T], out: &mut [T]);
}
