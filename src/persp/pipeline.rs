//! Perspective integration pipeline.
//!
//! Typical usage:
//! ```no_run
//! use nalgebra::Matrix3;
//! use normal_integration::{PerspectiveIntegrator, PerspectiveParams};
//! use normal_integration::grid::{MaskGrid, NormalGrid};
//!
//! # fn example(mask: MaskGrid, normals: NormalGrid, kmtx: Matrix3<f64>) {
//! let integrator = PerspectiveIntegrator::new(PerspectiveParams::new(kmtx));
//! let result = integrator.process(&mask, &normals).unwrap();
//! println!("smallest eigenvalue: {:.3e}", result.eigenvalue);
//! # }
//! ```

use log::debug;
use std::time::Instant;

use nalgebra::Matrix3;

use super::assembly::{camera_rays, plane_equation_matrix};
use crate::domain::{adjacency, PixelIndexMap};
use crate::error::IntegrationError;
use crate::grid::{validate_shapes, GridF64, MaskGrid, NormalGrid};
use crate::mesh::{facets_from_index_map, vertices_from_rays, SurfaceMesh};
use crate::solvers::{smallest_eigenpair, EigenOptions};
use crate::types::PerspectiveResult;

/// Configuration for [`PerspectiveIntegrator`].
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveParams {
    /// Camera intrinsic matrix; must be invertible.
    pub kmtx: Matrix3<f64>,
    /// Eigen solver configuration.
    pub eigen: EigenOptions,
}

impl PerspectiveParams {
    /// Parameters with default solver settings for the given intrinsics.
    pub fn new(kmtx: Matrix3<f64>) -> Self {
        Self {
            kmtx,
            eigen: EigenOptions::default(),
        }
    }
}

/// Recovers depths along camera rays from unit surface normals under a
/// pinhole camera, by finding the null-space direction of the stacked
/// plane-fitting equations.
pub struct PerspectiveIntegrator {
    params: PerspectiveParams,
}

impl PerspectiveIntegrator {
    /// Create an integrator with the supplied parameters.
    pub fn new(params: PerspectiveParams) -> Self {
        Self { params }
    }

    /// Integrate the normal field over the masked domain.
    ///
    /// The homogeneous formulation determines depths only up to one global
    /// scale and sign. The returned depths come from the unit-norm
    /// eigenvector, sign-flipped so the mean depth is non-negative; callers
    /// needing metric depth must rescale against external knowledge.
    pub fn process(
        &self,
        mask: &MaskGrid,
        normals: &NormalGrid,
    ) -> Result<PerspectiveResult, IntegrationError> {
        let total_start = Instant::now();
        validate_shapes(mask, normals)?;
        let index = PixelIndexMap::build(mask);
        let n = index.num_active();
        if n == 0 {
            return Err(IntegrationError::EmptyMask);
        }
        debug!(
            "perspective: {}x{} mask, {} active pixels",
            mask.h, mask.w, n
        );

        let rays = camera_rays(&index, &self.params.kmtx)?;
        let adj = adjacency(mask, &index);
        let a = plane_equation_matrix(&index, normals, &rays, &adj);
        debug!(
            "perspective: {} plane equations over {} unknowns",
            a.nrows(),
            a.ncols()
        );

        let ata = &a.transpose() * &a;
        let solver_start = Instant::now();
        let pair = smallest_eigenpair(&ata, &self.params.eigen)?;
        let solver_runtime_ms = solver_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "perspective: eigenvalue {:.3e} after {} iterations",
            pair.value, pair.iterations
        );

        // Resolve the sign ambiguity toward a non-negative mean depth.
        let mut x = pair.vector;
        let depth_sum: f64 = x.rows(0, n).iter().sum();
        if depth_sum < 0.0 {
            x = -x;
        }
        let depths: Vec<f64> = x.rows(0, n).iter().copied().collect();

        let mut depth_map = GridF64::filled(mask.h, mask.w, f64::NAN);
        for (i, r, c) in index.iter() {
            depth_map.set(r, c, depths[i]);
        }
        let surface = SurfaceMesh {
            vertices: vertices_from_rays(&rays, &depths),
            triangles: facets_from_index_map(&index),
        };

        Ok(PerspectiveResult {
            depth_map,
            surface,
            eigenvalue: pair.value,
            solver_iterations: pair.iterations,
            solver_runtime_ms,
            total_runtime_ms: total_start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
