//! Orthographic integration pipeline.
//!
//! Typical usage:
//! ```no_run
//! use normal_integration::{OrthographicIntegrator, OrthographicParams};
//! use normal_integration::grid::{MaskGrid, NormalGrid};
//!
//! # fn example(mask: MaskGrid, normals: NormalGrid) {
//! let integrator = OrthographicIntegrator::new(OrthographicParams::default());
//! let result = integrator.process(&mask, &normals).unwrap();
//! println!("solver stopped after {} iterations", result.solver.iterations);
//! # }
//! ```

use log::debug;
use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use std::time::Instant;

use super::operators::gradient_operators;
use crate::domain::PixelIndexMap;
use crate::error::IntegrationError;
use crate::grid::{validate_shapes, GridF64, MaskGrid, NormalGrid};
use crate::mesh::{facets_from_index_map, vertices_from_depth_map, SurfaceMesh};
use crate::solvers::{lsqr, LsqrOptions};
use crate::types::OrthographicResult;

/// Normals with |nz| below this would blow up the gradient targets.
const NZ_EPS: f64 = 1e-8;

/// Configuration for [`OrthographicIntegrator`].
#[derive(Clone, Copy, Debug)]
pub struct OrthographicParams {
    /// Physical distance between adjacent pixel centers.
    pub step_size: f64,
    /// Least-squares solver stopping configuration.
    pub lsqr: LsqrOptions,
}

impl Default for OrthographicParams {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            lsqr: LsqrOptions::default(),
        }
    }
}

/// Recovers a depth map from unit surface normals under orthographic
/// projection by integrating the gradient field `p = -nx/nz`, `q = -ny/nz`
/// in the least-squares sense.
pub struct OrthographicIntegrator {
    params: OrthographicParams,
}

impl OrthographicIntegrator {
    /// Create an integrator with the supplied parameters.
    pub fn new(params: OrthographicParams) -> Self {
        Self { params }
    }

    /// Integrate the normal field over the masked domain.
    ///
    /// The depth is determined up to one global additive constant (the
    /// solver picks the minimum-norm representative). Hitting the LSQR
    /// iteration limit is reported through the summary, not as an error.
    pub fn process(
        &self,
        mask: &MaskGrid,
        normals: &NormalGrid,
    ) -> Result<OrthographicResult, IntegrationError> {
        let total_start = Instant::now();
        validate_shapes(mask, normals)?;
        let index = PixelIndexMap::build(mask);
        let n = index.num_active();
        if n == 0 {
            return Err(IntegrationError::EmptyMask);
        }
        debug!(
            "orthographic: {}x{} mask, {} active pixels",
            mask.h, mask.w, n
        );

        let (p, q) = gradient_targets(&index, normals)?;
        let (d_u, d_v) = gradient_operators(&index, self.params.step_size);
        if d_u.nnz() + d_v.nnz() == 0 {
            return Err(IntegrationError::DegenerateSystem);
        }

        // Stack the two operators into one 2n × n system, vertical block on
        // top, and the matching right-hand side.
        let mut coo = CooMatrix::new(2 * n, n);
        for (i, j, v) in d_u.triplet_iter() {
            coo.push(i, j, *v);
        }
        for (i, j, v) in d_v.triplet_iter() {
            coo.push(n + i, j, *v);
        }
        let a = CsrMatrix::from(&coo);
        let mut b = DVector::zeros(2 * n);
        b.rows_mut(0, n).copy_from(&p);
        b.rows_mut(n, n).copy_from(&q);

        let solver_start = Instant::now();
        let (z, summary) = lsqr(&a, &b, &self.params.lsqr);
        let solver_runtime_ms = solver_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "orthographic: lsqr {:?} after {} iterations, residual {:.3e}",
            summary.stop_reason, summary.iterations, summary.residual_norm
        );

        let residual = &a * &z - &b;

        let mut depth_map = GridF64::filled(mask.h, mask.w, f64::NAN);
        for (i, r, c) in index.iter() {
            depth_map.set(r, c, z[i]);
        }
        let surface = SurfaceMesh {
            vertices: vertices_from_depth_map(&index, &depth_map, self.params.step_size),
            triangles: facets_from_index_map(&index),
        };

        Ok(OrthographicResult {
            depth_map,
            surface,
            residual,
            solver: summary,
            solver_runtime_ms,
            total_runtime_ms: total_start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

/// Per-pixel gradient targets `p = -nx/nz`, `q = -ny/nz` in index order.
fn gradient_targets(
    index: &PixelIndexMap,
    normals: &NormalGrid,
) -> Result<(DVector<f64>, DVector<f64>), IntegrationError> {
    let n = index.num_active();
    let mut p = DVector::zeros(n);
    let mut q = DVector::zeros(n);
    for (i, r, c) in index.iter() {
        let normal = normals.get(r, c);
        if normal.z.abs() < NZ_EPS {
            return Err(IntegrationError::DegenerateNormal { row: r, col: c });
        }
        p[i] = -normal.x / normal.z;
        q[i] = -normal.y / normal.z;
    }
    Ok((p, q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    /// Unit normal of the plane `z = pu·u + pv·v`.
    fn plane_normal(pu: f64, pv: f64) -> Vector3<f64> {
        Vector3::new(-pu, -pv, 1.0).normalize()
    }

    #[test]
    fn recovers_plane_up_to_constant() {
        let (h, w) = (8, 9);
        let (pu, pv) = (0.4, -0.25);
        let mask = MaskGrid::from_fn(h, w, |_, _| true);
        let normals = NormalGrid::from_fn(h, w, |_, _| plane_normal(pu, pv));

        let integrator = OrthographicIntegrator::new(OrthographicParams::default());
        let result = integrator.process(&mask, &normals).unwrap();
        assert!(result.solver.converged());

        // compare against ground truth after removing the additive constant
        let truth = |r: usize, c: usize| pu * (h - 1 - r) as f64 + pv * c as f64;
        let offset = result.depth_map.get(0, 0) - truth(0, 0);
        for r in 0..h {
            for c in 0..w {
                assert_relative_eq!(
                    result.depth_map.get(r, c) - offset,
                    truth(r, c),
                    epsilon = 1e-6
                );
            }
        }
        assert!(result.residual.norm() < 1e-6);
    }

    #[test]
    fn inactive_pixels_are_nan() {
        let mask = MaskGrid::from_fn(3, 3, |r, c| r == 1 || c == 1);
        let normals = NormalGrid::from_fn(3, 3, |_, _| Vector3::new(0.0, 0.0, 1.0));

        let integrator = OrthographicIntegrator::new(OrthographicParams::default());
        let result = integrator.process(&mask, &normals).unwrap();

        assert!(result.depth_map.get(0, 0).is_nan());
        assert!(result.depth_map.get(2, 2).is_nan());
        assert!(result.depth_map.get(1, 1).is_finite());
    }

    #[test]
    fn empty_mask_is_rejected() {
        let mask = MaskGrid::new(4, 4);
        let normals = NormalGrid::from_fn(4, 4, |_, _| Vector3::new(0.0, 0.0, 1.0));
        let err = OrthographicIntegrator::new(OrthographicParams::default())
            .process(&mask, &normals)
            .unwrap_err();
        assert_eq!(err, IntegrationError::EmptyMask);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let mask = MaskGrid::from_fn(4, 4, |_, _| true);
        let normals = NormalGrid::from_fn(4, 5, |_, _| Vector3::new(0.0, 0.0, 1.0));
        let err = OrthographicIntegrator::new(OrthographicParams::default())
            .process(&mask, &normals)
            .unwrap_err();
        assert_eq!(
            err,
            IntegrationError::ShapeMismatch {
                mask: (4, 4),
                normals: (4, 5)
            }
        );
    }

    #[test]
    fn near_zero_nz_is_rejected() {
        let mask = MaskGrid::from_fn(2, 2, |_, _| true);
        let mut normals = NormalGrid::from_fn(2, 2, |_, _| Vector3::new(0.0, 0.0, 1.0));
        normals.set(1, 0, Vector3::new(1.0, 0.0, 0.0));
        let err = OrthographicIntegrator::new(OrthographicParams::default())
            .process(&mask, &normals)
            .unwrap_err();
        assert_eq!(err, IntegrationError::DegenerateNormal { row: 1, col: 0 });
    }

    #[test]
    fn fully_isolated_domain_is_degenerate() {
        // two pixels with no 4-adjacency between them
        let mask = MaskGrid::from_fn(3, 3, |r, c| (r, c) == (0, 0) || (r, c) == (2, 2));
        let normals = NormalGrid::from_fn(3, 3, |_, _| Vector3::new(0.0, 0.0, 1.0));
        let err = OrthographicIntegrator::new(OrthographicParams::default())
            .process(&mask, &normals)
            .unwrap_err();
        assert_eq!(err, IntegrationError::DegenerateSystem);
    }

    #[test]
    fn step_size_rescales_recovered_slopes() {
        // same normals, doubled spacing: slope per pixel doubles
        let (h, w) = (4, 4);
        let mask = MaskGrid::from_fn(h, w, |_, _| true);
        let normals = NormalGrid::from_fn(h, w, |_, _| plane_normal(0.0, 0.5));

        let params = OrthographicParams {
            step_size: 2.0,
            ..Default::default()
        };
        let result = OrthographicIntegrator::new(params)
            .process(&mask, &normals)
            .unwrap();
        let d = result.depth_map.get(0, 1) - result.depth_map.get(0, 0);
        assert_relative_eq!(d, 1.0, epsilon = 1e-6);
    }
}
