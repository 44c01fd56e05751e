//! Sparse finite-difference gradient operators over the masked domain.
//!
//! Both operators are `n × n` (`n` = active pixels) with one row per active
//! pixel. The stencil adapts to the local mask topology:
//!
//! - both axis neighbors active → central difference `(z₊ − z₋) / 2`
//! - one neighbor active → one-sided difference toward that neighbor
//! - no neighbor on the axis → zero row (no constraint; accepted, the
//!   global least-squares fill-in handles it)
//!
//! All entries are divided by the physical step size. The vertical operator
//! differentiates along +u, which points up the image (decreasing row), to
//! match the camera-axis convention of the `p = -nx/nz` relation.

use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::domain::{AxisCase, PixelIndexMap};

fn push_stencil(coo: &mut CooMatrix<f64>, row: usize, case: AxisCase, inv_step: f64) {
    match case {
        AxisCase::Both { neg, pos } => {
            coo.push(row, neg, -0.5 * inv_step);
            coo.push(row, pos, 0.5 * inv_step);
        }
        AxisCase::NegOnly(neg) => {
            coo.push(row, neg, -inv_step);
            coo.push(row, row, inv_step);
        }
        AxisCase::PosOnly(pos) => {
            coo.push(row, row, -inv_step);
            coo.push(row, pos, inv_step);
        }
        AxisCase::Isolated => {}
    }
}

/// Build the vertical (`D_u`) and horizontal (`D_v`) gradient operators.
pub fn gradient_operators(
    index: &PixelIndexMap,
    step_size: f64,
) -> (CsrMatrix<f64>, CsrMatrix<f64>) {
    let n = index.num_active();
    let inv_step = 1.0 / step_size;
    let mut coo_u = CooMatrix::new(n, n);
    let mut coo_v = CooMatrix::new(n, n);

    for (i, r, c) in index.iter() {
        push_stencil(&mut coo_u, i, AxisCase::vertical(index, r, c), inv_step);
        push_stencil(&mut coo_v, i, AxisCase::horizontal(index, r, c), inv_step);
    }

    (CsrMatrix::from(&coo_u), CsrMatrix::from(&coo_v))
}
