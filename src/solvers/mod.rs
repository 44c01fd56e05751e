//! Sparse solvers backing the two pipelines.
//!
//! - [`lsqr`] – iterative sparse linear least-squares (orthographic).
//! - [`eigen`] – smallest-magnitude eigenpair of a sparse symmetric matrix
//!   via shift-invert and inverse power iteration (perspective).
//!
//! Both treat the matrices as immutable and never form anything dense of
//! system size. A solve is the single CPU-bound bottleneck of a run; callers
//! wrap it in timing and report the elapsed milliseconds.

pub mod eigen;
pub mod lsqr;

pub use eigen::{smallest_eigenpair, EigenOptions, SmallestEigenpair};
pub use lsqr::{lsqr, LsqrOptions, LsqrSummary, StopReason};
