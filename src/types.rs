//! Result types exposed by the two integrators.

use nalgebra::DVector;

use crate::grid::GridF64;
use crate::mesh::SurfaceMesh;
use crate::solvers::LsqrSummary;

/// Output of [`crate::OrthographicIntegrator::process`].
#[derive(Clone, Debug)]
pub struct OrthographicResult {
    /// H×W depth map; `NaN` at inactive pixels.
    pub depth_map: GridF64,
    /// Triangulated surface over the active pixels.
    pub surface: SurfaceMesh,
    /// Residual `A z − b` in system row order (vertical block first), for
    /// convergence diagnostics.
    pub residual: DVector<f64>,
    /// LSQR stopping summary. `converged() == false` marks a best-effort,
    /// degraded-quality depth map, not a failure.
    pub solver: LsqrSummary,
    /// Time spent inside the least-squares solve.
    pub solver_runtime_ms: f64,
    /// End-to-end pipeline time including assembly and mesh construction.
    pub total_runtime_ms: f64,
}

/// Output of [`crate::PerspectiveIntegrator::process`].
#[derive(Clone, Debug)]
pub struct PerspectiveResult {
    /// H×W depth map; `NaN` at inactive pixels. Depths carry the global
    /// scale/sign ambiguity of the homogeneous formulation, resolved to
    /// unit-norm eigenvector with non-negative mean depth.
    pub depth_map: GridF64,
    /// Triangulated surface; vertices lie on the camera rays.
    pub surface: SurfaceMesh,
    /// Smallest eigenvalue found (Rayleigh quotient); near zero for
    /// consistent normal fields.
    pub eigenvalue: f64,
    /// Inverse power iterations spent in the eigen solve.
    pub solver_iterations: usize,
    /// Time spent inside the eigen solve.
    pub solver_runtime_ms: f64,
    /// End-to-end pipeline time including assembly and mesh construction.
    pub total_runtime_ms: f64,
}
