//! Error taxonomy shared by both integration pipelines.
//!
//! Invalid inputs are rejected before any matrix assembly. Solver-side
//! failures split in two: LSQR stopping at its iteration limit is a
//! degraded-but-usable result reported through [`crate::solvers::LsqrSummary`],
//! while an eigen-solver failure has no usable partial result and aborts the
//! perspective pipeline with one of the hard variants below.

/// Reasons why an integration run may be rejected or aborted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntegrationError {
    /// The mask contains no active pixels.
    EmptyMask,
    /// Mask and normal grid dimensions disagree.
    ShapeMismatch {
        mask: (usize, usize),
        normals: (usize, usize),
    },
    /// An active pixel carries a normal whose z component is (near) zero,
    /// which would divide by zero in the `p = -nx/nz` computation.
    DegenerateNormal { row: usize, col: usize },
    /// The camera intrinsic matrix is not invertible.
    SingularIntrinsics,
    /// Every active pixel is isolated on both axes: the system matrix is
    /// entirely zero and carries no constraint at all.
    DegenerateSystem,
    /// Sparse Cholesky factorization of the shifted normal matrix failed
    /// even after shift escalation.
    EigenFactorization,
    /// Inverse power iteration did not converge to the smallest eigenpair.
    EigenNonConvergence { iterations: usize },
}

impl std::fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrationError::EmptyMask => write!(f, "mask has no active pixels"),
            IntegrationError::ShapeMismatch { mask, normals } => write!(
                f,
                "mask is {}x{} but normal grid is {}x{}",
                mask.0, mask.1, normals.0, normals.1
            ),
            IntegrationError::DegenerateNormal { row, col } => write!(
                f,
                "normal at ({row}, {col}) has a near-zero z component"
            ),
            IntegrationError::SingularIntrinsics => {
                write!(f, "camera intrinsic matrix is not invertible")
            }
            IntegrationError::DegenerateSystem => {
                write!(f, "system matrix is entirely zero (all active pixels isolated)")
            }
            IntegrationError::EigenFactorization => {
                write!(f, "sparse Cholesky factorization failed for the normal matrix")
            }
            IntegrationError::EigenNonConvergence { iterations } => write!(
                f,
                "inverse power iteration did not converge after {iterations} iterations"
            ),
        }
    }
}

impl std::error::Error for IntegrationError {}
