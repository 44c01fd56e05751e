//! Perspective normal integration via inverse plane fitting.
//!
//! Under a pinhole camera each pixel sees the surface along a ray
//! `p̃ = K⁻¹·[u, v, 1]ᵀ`, and the surface point is `z·p̃` for an unknown
//! depth `z`. For every active pixel and each of its active 4-neighbors the
//! local tangent plane yields one homogeneous equation; stacking them gives
//! a system whose null-space direction holds the depths. The pipeline
//! recovers it as the smallest eigenpair of the normal-equations matrix.
//!
//! Modules
//! - [`assembly`] – camera rays and the sparse plane-equation matrix.
//! - `pipeline` – the [`PerspectiveIntegrator`] front end.

pub mod assembly;
mod pipeline;

pub use pipeline::{PerspectiveIntegrator, PerspectiveParams};
