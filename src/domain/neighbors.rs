//! Per-axis neighbor classification and 4-neighbor adjacency.

use super::PixelIndexMap;
use crate::grid::MaskGrid;

/// Which axis neighbors of an active pixel are themselves active, carrying
/// the dense index of each active neighbor.
///
/// The variants are mutually exclusive and exhaustive over active pixels.
/// "Negative"/"positive" refer to the axis direction: on the horizontal axis
/// the positive neighbor sits at `col + 1`; on the vertical axis the
/// positive direction points up the image, so the positive neighbor sits at
/// `row - 1` (depth gradients follow the camera's u axis, the vertically
/// flipped row axis).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisCase {
    /// No active neighbor on this axis; the pixel contributes no constraint
    /// for this axis's slope.
    Isolated,
    /// Only the negative-side neighbor is active (backward difference).
    NegOnly(usize),
    /// Only the positive-side neighbor is active (forward difference).
    PosOnly(usize),
    /// Both neighbors are active (central difference).
    Both { neg: usize, pos: usize },
}

impl AxisCase {
    fn from_neighbors(neg: Option<usize>, pos: Option<usize>) -> Self {
        match (neg, pos) {
            (None, None) => AxisCase::Isolated,
            (Some(n), None) => AxisCase::NegOnly(n),
            (None, Some(p)) => AxisCase::PosOnly(p),
            (Some(n), Some(p)) => AxisCase::Both { neg: n, pos: p },
        }
    }

    /// Classify the horizontal axis at (row, col): negative = `col - 1`,
    /// positive = `col + 1`.
    pub fn horizontal(index: &PixelIndexMap, row: usize, col: usize) -> Self {
        let row = row as isize;
        let col = col as isize;
        Self::from_neighbors(
            probe_index(index, row, col - 1),
            probe_index(index, row, col + 1),
        )
    }

    /// Classify the vertical axis at (row, col): negative = `row + 1`
    /// (down the image), positive = `row - 1` (up).
    pub fn vertical(index: &PixelIndexMap, row: usize, col: usize) -> Self {
        let row = row as isize;
        let col = col as isize;
        Self::from_neighbors(
            probe_index(index, row + 1, col),
            probe_index(index, row - 1, col),
        )
    }
}

/// Bounds-checked index lookup; out-of-bounds counts as inactive.
#[inline]
fn probe_index(index: &PixelIndexMap, row: isize, col: isize) -> Option<usize> {
    if row < 0 || col < 0 || row >= index.height() as isize || col >= index.width() as isize {
        return None;
    }
    index.index_of(row as usize, col as usize)
}

/// Active-neighbor lists over the masked domain.
///
/// For each active pixel `p` (in index order) the entry holds the dense
/// indices of `p` itself followed by its active 4-neighbors in the fixed
/// order up, down, left, right (between 1 and 5 entries). The perspective
/// assembler emits one plane equation per entry.
pub fn adjacency(mask: &MaskGrid, index: &PixelIndexMap) -> Vec<Vec<usize>> {
    const OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    let mut lists = Vec::with_capacity(index.num_active());
    for (i, r, c) in index.iter() {
        let mut entry = Vec::with_capacity(5);
        entry.push(i);
        for &(dr, dc) in &OFFSETS {
            if mask.neighbor_active(r, c, dr, dc) {
                let nr = (r as isize + dr) as usize;
                let nc = (c as isize + dc) as usize;
                if let Some(j) = index.index_of(nr, nc) {
                    entry.push(j);
                }
            }
        }
        lists.push(entry);
    }
    lists
}
