use crate::{autodiff::Dual, jacobian::evaluate_jacobian, traits::VectorFunction};
use anyhow::{bail, Context, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    #[error("cannot pseudo-invert an empty {rows}x{cols} matrix")]
    Empty { rows: usize, cols: usize },
    #[error("matrix entry ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },
    #[error("rank tolerance must be non-negative, got {0}")]
    InvalidTolerance(f64),
    #[error("singular value decomposition failed: {0}")]
    Decomposition(&'static str),
}

/// Moore-Penrose pseudo-inverse of `matrix`.
///
/// Singular values at or below `tolerance` are treated as zero, which is how the rank of the
/// matrix is decided. The factorization itself is nalgebra's SVD.
pub fn pseudo_inverse(matrix: &DMatrix<f64>, tolerance: f64) -> Result<DMatrix<f64>, LinalgError> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Err(LinalgError::Empty { rows, cols });
    }
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(LinalgError::InvalidTolerance(tolerance));
    }
    for col in 0..cols {
        for row in 0..rows {
            if !matrix[(row, col)].is_finite() {
                return Err(LinalgError::NonFinite { row, col });
            }
        }
    }
    matrix
        .clone()
        .pseudo_inverse(tolerance)
        .map_err(LinalgError::Decomposition)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeastSquaresSettings {
    pub max_steps: usize,
    pub damping: f64,
    pub tolerance: f64,
    pub rank_tolerance: f64,
}

impl Default for LeastSquaresSettings {
    fn default() -> Self {
        Self {
            max_steps: 50,
            damping: 1.0,
            tolerance: 1e-10,
            rank_tolerance: 1e-12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeastSquaresResult {
    pub state: Vec<f64>,
    pub residual_norm: f64,
    pub iterations: usize,
}

/// Minimizes ‖r(x)‖ for a residual function r: R^N -> R^M with Gauss-Newton steps
/// `x <- x - damping * J(x)^+ r(x)`.
///
/// J comes from a dual-number evaluation of `system`, so no finite differences are involved.
/// Iteration stops once the residual norm or the step length falls to `tolerance`.
pub fn solve_least_squares<const N: usize, S>(
    system: &S,
    initial_guess: &[f64],
    settings: LeastSquaresSettings,
) -> Result<LeastSquaresResult>
where
    S: VectorFunction<f64> + VectorFunction<Dual<f64, N>>,
{
    if initial_guess.len() != N {
        bail!(
            "Initial guess dimension mismatch. Expected {}, got {}.",
            N,
            initial_guess.len()
        );
    }
    if settings.max_steps == 0 {
        bail!("max_steps must be greater than zero.");
    }
    if !settings.damping.is_finite() || settings.damping <= 0.0 {
        bail!("damping must be positive and finite.");
    }
    if !settings.tolerance.is_finite() || settings.tolerance <= 0.0 {
        bail!("tolerance must be positive and finite.");
    }

    let mut state = initial_guess.to_vec();
    let mut iterations = 0usize;

    loop {
        let eval = evaluate_jacobian::<N, S>(system, &state)?;
        let residual_norm = l2_norm(&eval.value);
        if residual_norm <= settings.tolerance {
            return Ok(LeastSquaresResult {
                state,
                residual_norm,
                iterations,
            });
        }

        if iterations >= settings.max_steps {
            bail!(
                "Gauss-Newton solver failed to converge in {} steps (‖r(x)‖ = {}).",
                settings.max_steps,
                residual_norm
            );
        }

        let j_pinv = pseudo_inverse(&eval.matrix(), settings.rank_tolerance)
            .context("Failed to pseudo-invert Jacobian during Gauss-Newton iteration.")?;
        let delta = j_pinv * DVector::from_column_slice(&eval.value);

        for (x, dx) in state.iter_mut().zip(delta.iter()) {
            *x -= settings.damping * dx;
        }
        iterations += 1;

        // Stationary point with a non-zero residual: the least-squares minimum.
        if settings.damping * delta.norm() <= settings.tolerance {
            let mut residual = vec![0.0; eval.rows];
            <S as VectorFunction<f64>>::apply(system, &state, &mut residual);
            return Ok(LeastSquaresResult {
                state,
                residual_norm: l2_norm(&residual),
                iterations,
            });
        }
    }
}

fn l2_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}
