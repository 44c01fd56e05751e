#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod grid;
pub mod mesh;
pub mod ortho;
pub mod persp;
pub mod types;

// Lower-level building blocks – public for tools and tests, but considered
// unstable internals.
pub mod domain;
pub mod solvers;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the two integrators + their results.
pub use crate::ortho::{OrthographicIntegrator, OrthographicParams};
pub use crate::persp::{PerspectiveIntegrator, PerspectiveParams};
pub use crate::types::{OrthographicResult, PerspectiveResult};

pub use crate::error::IntegrationError;
pub use crate::mesh::SurfaceMesh;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use normal_integration::prelude::*;
/// use nalgebra::Vector3;
///
/// # fn main() {
/// let mask = MaskGrid::from_fn(32, 32, |_, _| true);
/// let normals = NormalGrid::from_fn(32, 32, |_, _| Vector3::new(0.0, 0.0, 1.0));
///
/// let integrator = OrthographicIntegrator::new(OrthographicParams::default());
/// let result = integrator.process(&mask, &normals).unwrap();
/// println!(
///     "residual={:.3e} total_ms={:.3}",
///     result.residual.norm(),
///     result.total_runtime_ms
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::grid::{GridF64, MaskGrid, NormalGrid};
    pub use crate::{
        IntegrationError, OrthographicIntegrator, OrthographicParams, OrthographicResult,
        PerspectiveIntegrator, PerspectiveParams, PerspectiveResult, SurfaceMesh,
    };
}
