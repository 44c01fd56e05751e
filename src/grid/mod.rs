//! Owned row-major grid buffers used throughout the pipelines.
//!
//! All grids share the `(row, col)` addressing convention with
//! `idx = row * stride + col` and `stride == width`. They are plain data
//! holders: the masked-domain logic lives in [`crate::domain`].

mod f64grid;
mod mask;
mod normals;

pub use f64grid::GridF64;
pub use mask::MaskGrid;
pub use normals::NormalGrid;

use crate::error::IntegrationError;

/// Reject mask/normal grids of disagreeing dimensions before any assembly.
pub(crate) fn validate_shapes(
    mask: &MaskGrid,
    normals: &NormalGrid,
) -> Result<(), IntegrationError> {
    if mask.h != normals.h || mask.w != normals.w {
        return Err(IntegrationError::ShapeMismatch {
            mask: (mask.h, mask.w),
            normals: (normals.h, normals.w),
        });
    }
    Ok(())
}
