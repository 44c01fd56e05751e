//! Sparse LSQR for `min ‖Ax − b‖₂`.
//!
//! Golub–Kahan bidiagonalization with QR updates, following Paige &
//! Saunders, "LSQR: An algorithm for sparse linear equations and sparse
//! least squares", TOMS 1982. The matrix participates only through
//! sparse-dense products with `A` and `Aᵀ`, so zero rows (unconstrained
//! pixels) are harmless: they simply never contribute to the
//! bidiagonalization.
//!
//! Hitting the iteration limit is not a failure. The current iterate is
//! still the best available least-squares estimate and is returned together
//! with a [`LsqrSummary`] describing how the run stopped.

use nalgebra::DVector;
use nalgebra_sparse::CsrMatrix;
use serde::Serialize;

/// Stopping configuration for [`lsqr`].
#[derive(Clone, Copy, Debug)]
pub struct LsqrOptions {
    /// Relative tolerance on `‖Aᵀr‖ / (‖A‖·‖r‖)` (normal-equation test).
    pub atol: f64,
    /// Relative tolerance on `‖r‖ / ‖b‖` (residual test).
    pub btol: f64,
    /// Iteration cap; `None` selects `2 · ncols`.
    pub max_iter: Option<usize>,
}

impl Default for LsqrOptions {
    fn default() -> Self {
        Self {
            atol: 1e-14,
            btol: 1e-14,
            max_iter: None,
        }
    }
}

/// Why the iteration stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// `‖r‖` dropped below the combined atol/btol threshold.
    ResidualTolerance,
    /// `‖Aᵀr‖ / (‖A‖·‖r‖)` dropped below atol: a least-squares optimum.
    NormalEquationTolerance,
    /// Iteration cap reached; the iterate is a best-effort estimate.
    IterationLimit,
}

/// Diagnostics describing an LSQR run.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LsqrSummary {
    pub iterations: usize,
    pub stop_reason: StopReason,
    /// Estimated `‖A x − b‖` at the final iterate.
    pub residual_norm: f64,
    /// Estimated `‖Aᵀ (A x − b)‖` at the final iterate.
    pub normal_residual_norm: f64,
}

impl LsqrSummary {
    /// Whether one of the tolerance-based tests fired.
    pub fn converged(&self) -> bool {
        self.stop_reason != StopReason::IterationLimit
    }
}

/// Solve `min ‖Ax − b‖₂` for sparse `A`, returning the iterate and a
/// stopping summary.
pub fn lsqr(a: &CsrMatrix<f64>, b: &DVector<f64>, opts: &LsqrOptions) -> (DVector<f64>, LsqrSummary) {
    let n = a.ncols();
    let at = a.transpose();
    let max_iter = opts.max_iter.unwrap_or(2 * n.max(1));

    let mut x = DVector::zeros(n);

    let bnorm = b.norm();
    if bnorm == 0.0 {
        return (
            x,
            LsqrSummary {
                iterations: 0,
                stop_reason: StopReason::ResidualTolerance,
                residual_norm: 0.0,
                normal_residual_norm: 0.0,
            },
        );
    }

    let mut beta = bnorm;
    let mut u = b / beta;
    let mut v: DVector<f64> = &at * &u;
    let mut alpha = v.norm();
    if alpha == 0.0 {
        // Aᵀb = 0: x = 0 already minimizes the residual.
        return (
            x,
            LsqrSummary {
                iterations: 0,
                stop_reason: StopReason::NormalEquationTolerance,
                residual_norm: bnorm,
                normal_residual_norm: 0.0,
            },
        );
    }
    v /= alpha;

    let mut w = v.clone();
    let mut phibar = beta;
    let mut rhobar = alpha;
    let mut anorm_sq = alpha * alpha;

    let mut rnorm = beta;
    let mut arnorm = alpha * beta;
    let mut stop_reason = StopReason::IterationLimit;
    let mut iterations = 0;

    for iter in 1..=max_iter {
        iterations = iter;

        // Continue the bidiagonalization.
        u = (a * &v) - u * alpha;
        beta = u.norm();
        if beta > 0.0 {
            u /= beta;
        }
        anorm_sq += beta * beta;

        v = (&at * &u) - v * beta;
        alpha = v.norm();
        if alpha > 0.0 {
            v /= alpha;
        }
        anorm_sq += alpha * alpha;

        // Plane rotation eliminating the subdiagonal element.
        let rho = (rhobar * rhobar + beta * beta).sqrt();
        let c = rhobar / rho;
        let s = beta / rho;
        let theta = s * alpha;
        rhobar = -c * alpha;
        let phi = c * phibar;
        phibar *= s;

        x.axpy(phi / rho, &w, 1.0);
        w = &v - &w * (theta / rho);

        rnorm = phibar;
        arnorm = alpha * (c * phibar).abs();
        let anorm = anorm_sq.sqrt();
        let xnorm = x.norm();

        if rnorm <= opts.btol * bnorm + opts.atol * anorm * xnorm {
            stop_reason = StopReason::ResidualTolerance;
            break;
        }
        if anorm * rnorm > 0.0 && arnorm / (anorm * rnorm) <= opts.atol {
            stop_reason = StopReason::NormalEquationTolerance;
            break;
        }
        if alpha == 0.0 {
            // Krylov space exhausted; the iterate is exact.
            stop_reason = StopReason::NormalEquationTolerance;
            break;
        }
    }

    (
        x,
        LsqrSummary {
            iterations,
            stop_reason,
            residual_norm: rnorm,
            normal_residual_norm: arnorm,
        },
    )
}
