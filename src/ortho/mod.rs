//! Orthographic normal integration.
//!
//! Under orthographic projection the depth gradients relate linearly to the
//! normal components: `∂z/∂u = -nx/nz`, `∂z/∂v = -ny/nz`. The pipeline
//! builds one sparse finite-difference operator per axis over the masked
//! domain, stacks them into a single least-squares system and solves it
//! with LSQR. The depth is recovered up to one global additive constant.
//!
//! Modules
//! - [`operators`] – per-axis sparse gradient operators with
//!   boundary-adaptive stencils.
//! - `pipeline` – the [`OrthographicIntegrator`] front end.

pub mod operators;
mod pipeline;

pub use pipeline::{OrthographicIntegrator, OrthographicParams};
