mod common;

use approx::assert_relative_eq;
use common::synthetic_surface::{persp_plane_depth, persp_plane_normals, pinhole};
use nalgebra::Vector3;
use normal_integration::prelude::*;

#[test]
fn planar_surface_depths_match_after_mean_normalization() {
    let (h, w) = (10, 12);
    let kmtx = pinhole(15.0, 4.5, 5.5);
    let n_plane = Vector3::new(0.12, -0.08, 1.0).normalize();
    let d = 4.0;

    // diamond-shaped mask to exercise ragged neighbor lists
    let mask = MaskGrid::from_fn(h, w, |r, c| {
        (r as i64 - 5).abs() + (c as i64 - 6).abs() <= 5
    });
    assert!(mask.count_active() > 0);
    let normals = persp_plane_normals(h, w, &n_plane);

    let result = PerspectiveIntegrator::new(PerspectiveParams::new(kmtx))
        .process(&mask, &normals)
        .unwrap();
    assert!(
        result.eigenvalue.abs() < 1e-8,
        "eigenvalue {:.3e}",
        result.eigenvalue
    );

    let mut solved = Vec::new();
    let mut truth = Vec::new();
    for r in 0..h {
        for c in 0..w {
            if mask.is_active(r, c) {
                solved.push(result.depth_map.get(r, c));
                truth.push(persp_plane_depth(&kmtx, h, r, c, &n_plane, d));
            } else {
                assert!(result.depth_map.get(r, c).is_nan());
            }
        }
    }
    let solved_mean = solved.iter().sum::<f64>() / solved.len() as f64;
    let truth_mean = truth.iter().sum::<f64>() / truth.len() as f64;
    assert!(solved_mean > 0.0, "sign convention: mean depth non-negative");

    for (zs, zt) in solved.iter().zip(truth.iter()) {
        assert_relative_eq!(zs / solved_mean, zt / truth_mean, epsilon = 1e-6);
    }
}

#[test]
fn recovered_vector_has_unit_scale() {
    let (h, w) = (6, 6);
    let kmtx = pinhole(8.0, 2.5, 2.5);
    let n_plane = Vector3::new(0.0, 0.1, 1.0).normalize();

    let mask = MaskGrid::from_fn(h, w, |_, _| true);
    let normals = persp_plane_normals(h, w, &n_plane);

    let result = PerspectiveIntegrator::new(PerspectiveParams::new(kmtx))
        .process(&mask, &normals)
        .unwrap();

    // the depth block is part of a unit-norm eigenvector, so its own norm
    // must be positive and at most one
    let depth_norm: f64 = (0..h)
        .flat_map(|r| (0..w).map(move |c| (r, c)))
        .map(|(r, c)| result.depth_map.get(r, c).powi(2))
        .sum::<f64>()
        .sqrt();
    assert!(depth_norm > 0.0);
    assert!(depth_norm <= 1.0 + 1e-9);
}

#[test]
fn shape_mismatch_is_rejected() {
    let mask = MaskGrid::from_fn(4, 4, |_, _| true);
    let normals = persp_plane_normals(4, 5, &Vector3::new(0.0, 0.0, 1.0));
    let err = PerspectiveIntegrator::new(PerspectiveParams::new(pinhole(1.0, 0.0, 0.0)))
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
