//! Camera rays and the sparse plane-equation system.
//!
//! Coordinate conventions: the camera's u axis points up the image while
//! rows grow downward, so the pixel coordinate fed to `K⁻¹` is
//! `u = H - 1 - row`, `v = col`. One plane equation is emitted per
//! (pixel, neighbor) pair, neighbor lists coming from the 4-adjacency of
//! the masked domain.

use nalgebra::{Matrix3, Vector3};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::domain::PixelIndexMap;
use crate::error::IntegrationError;
use crate::grid::NormalGrid;

/// Ray direction `p̃ = K⁻¹·[u, v, 1]ᵀ` for every active pixel, in dense
/// index order.
pub fn camera_rays(
    index: &PixelIndexMap,
    kmtx: &Matrix3<f64>,
) -> Result<Vec<Vector3<f64>>, IntegrationError> {
    let k_inv = kmtx
        .try_inverse()
        .ok_or(IntegrationError::SingularIntrinsics)?;
    let h = index.height();
    Ok(index
        .iter()
        .map(|(_, r, c)| k_inv * Vector3::new((h - 1 - r) as f64, c as f64, 1.0))
        .collect())
}

/// Build the plane-equation matrix A.
///
/// For active pixel `p` with normal `n(p)` and each `q` in its neighbor
/// list (itself first), one row holds `n(p)·p̃(q)` in column `q` of the
/// ray-weight block and `1` in column `num_active + p` of the offset block.
/// A surface point `z·p̃(q)` lies on `p`'s tangent plane exactly when the
/// row annihilates the stacked vector of depths and per-pixel plane
/// offsets, so consistent data puts the solution in the null space.
pub fn plane_equation_matrix(
    index: &PixelIndexMap,
    normals: &NormalGrid,
    rays: &[Vector3<f64>],
    adjacency: &[Vec<usize>],
) -> CsrMatrix<f64> {
    let n = index.num_active();
    let num_equations: usize = adjacency.iter().map(Vec::len).sum();
    let mut coo = CooMatrix::new(num_equations, 2 * n);

    let mut row = 0;
    for (p, r, c) in index.iter() {
        let normal = normals.get(r, c);
        for &q in &adjacency[p] {
            coo.push(row, q, normal.dot(&rays[q]));
            coo.push(row, n + p, 1.0);
            row += 1;
        }
    }
    CsrMatrix::from(&coo)
}
