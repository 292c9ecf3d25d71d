use crate::{autodiff::Dual, traits::Scalar, traits::VectorFunction};
use anyhow::{bail, Result};
use nalgebra::{DMatrix, SMatrix, SVector};
use serde::{Deserialize, Serialize};

/// Seeds every coordinate of `point` as its own tracked input.
pub fn seed<T: Scalar, const N: usize>(point: &SVector<T, N>) -> SVector<Dual<T, N>, N> {
    SVector::from_fn(|i, _| Dual::variable(point[i], i))
}

/// Value and gradient of a scalar function f: R^N -> R, in one forward pass.
pub fn gradient<T, F, const N: usize>(f: F, point: &SVector<T, N>) -> (T, SVector<T, N>)
where
    T: Scalar,
    F: Fn(&SVector<Dual<T, N>, N>) -> Dual<T, N>,
{
    let output = f(&seed(point));
    (output.value, output.derivative)
}

/// Value and Jacobian of f: R^N -> R^M, in one forward pass.
/// Row i of the Jacobian holds the partials of output i.
pub fn jacobian<T, F, const N: usize, const M: usize>(
    f: F,
    point: &SVector<T, N>,
) -> (SVector<T, M>, SMatrix<T, M, N>)
where
    T: Scalar,
    F: Fn(&SVector<Dual<T, N>, N>) -> SVector<Dual<T, N>, M>,
{
    let outputs = f(&seed(point));
    let value = SVector::from_fn(|i, _| outputs[i].value);
    let jac = SMatrix::from_fn(|i, j| outputs[i].derivative[j]);
    (value, jac)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JacobianResult {
    pub value: Vec<f64>,
    /// Row-major, `rows x cols`.
    pub jacobian: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
}

impl JacobianResult {
    pub fn matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.rows, self.cols, &self.jacobian)
    }
}

/// Evaluates a [`VectorFunction`] and its Jacobian at `x`.
///
/// The value comes from the plain `f64` implementation; the Jacobian from a single evaluation
/// with every input seeded in a `Dual<f64, N>`.
pub fn evaluate_jacobian<const N: usize, S>(system: &S, x: &[f64]) -> Result<JacobianResult>
where
    S: VectorFunction<f64> + VectorFunction<Dual<f64, N>>,
{
    if N == 0 {
        bail!("Jacobian width must be at least one input.");
    }
    let inputs = <S as VectorFunction<f64>>::input_dimension(system);
    if inputs != N {
        bail!(
            "Function takes {} inputs but the dual width is {}.",
            inputs,
            N
        );
    }
    if x.len() != N {
        bail!(
            "Input dimension mismatch. Expected {}, got {}.",
            N,
            x.len()
        );
    }
    let outputs = <S as VectorFunction<f64>>::output_dimension(system);
    if outputs == 0 {
        bail!("Function has zero outputs.");
    }

    let mut value = vec![0.0; outputs];
    <S as VectorFunction<f64>>::apply(system, x, &mut value);

    let dual_x: Vec<Dual<f64, N>> = x
        .iter()
        .enumerate()
        .map(|(i, &v)| Dual::variable(v, i))
        .collect();
    let mut dual_out = vec![Dual::<f64, N>::constant(0.0); outputs];
    <S as VectorFunction<Dual<f64, N>>>::apply(system, &dual_x, &mut dual_out);

    let mut jacobian = Vec::with_capacity(outputs * N);
    for out in &dual_out {
        jacobian.extend(out.derivative.iter().copied());
    }

    Ok(JacobianResult {
        value,
        jacobian,
        rows: outputs,
        cols: N,
    })
}
