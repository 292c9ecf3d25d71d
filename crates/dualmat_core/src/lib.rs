pub mod autodiff;
pub mod jacobian;
pub mod linalg;
/// The `dualmat_core` crate provides forward-mode automatic differentiation for fixed-size
/// numerics. It is designed to be generic, supporting both standard floating-point arithmetic
/// (`f32`, `f64`) and dual numbers carrying `N` partial derivatives.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `VectorFunction` (f: R^n -> R^m).
/// - **Autodiff**: `Dual<T, N>` and its arithmetic, elementary and selection functions.
/// - **Jacobian**: seeding helpers and drivers returning values with their Jacobians.
/// - **Linalg**: Moore-Penrose pseudo-inverse and a Gauss-Newton least-squares solver.
pub mod traits;

pub use autodiff::Dual;
pub use traits::{Scalar, VectorFunction};
