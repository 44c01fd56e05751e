//! Analytic planar surfaces with exactly consistent normal fields.

use nalgebra::{Matrix3, Vector3};
use normal_integration::prelude::*;

/// Plane depth under the orthographic convention: the vertical axis u grows
/// up the image, so `z(row, col) = pu·(h-1-row) + pv·col`.
pub fn ortho_plane_depth(h: usize, row: usize, col: usize, pu: f64, pv: f64) -> f64 {
    pu * (h - 1 - row) as f64 + pv * col as f64
}

/// Unit normal field of the plane with slopes `(pu, pv)`, constant over the
/// whole grid.
pub fn ortho_plane_normals(h: usize, w: usize, pu: f64, pv: f64) -> NormalGrid {
    let n = Vector3::new(-pu, -pv, 1.0).normalize();
    NormalGrid::from_fn(h, w, |_, _| n)
}

/// Pinhole intrinsics with focal length `f` and principal point `(cu, cv)`.
pub fn pinhole(f: f64, cu: f64, cv: f64) -> Matrix3<f64> {
    Matrix3::new(f, 0.0, cu, 0.0, f, cv, 0.0, 0.0, 1.0)
}

/// Ray direction of pixel (row, col) under the same flipped-u convention the
/// perspective pipeline uses.
pub fn camera_ray(kmtx: &Matrix3<f64>, h: usize, row: usize, col: usize) -> Vector3<f64> {
    let k_inv = kmtx.try_inverse().unwrap();
    k_inv * Vector3::new((h - 1 - row) as f64, col as f64, 1.0)
}

/// Depth along the pixel's ray for the plane `n·X = d`.
pub fn persp_plane_depth(
    kmtx: &Matrix3<f64>,
    h: usize,
    row: usize,
    col: usize,
    n_plane: &Vector3<f64>,
    d: f64,
) -> f64 {
    d / n_plane.dot(&camera_ray(kmtx, h, row, col))
}

/// Constant normal field of the perspective test plane.
pub fn persp_plane_normals(h: usize, w: usize, n_plane: &Vector3<f64>) -> NormalGrid {
    let n = *n_plane;
    NormalGrid::from_fn(h, w, |_, _| n)
}
