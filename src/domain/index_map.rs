//! Dense contiguous indexing of active pixels.

use crate::grid::MaskGrid;

/// Sentinel stored at inactive pixels of the forward map.
const NO_INDEX: i32 = -1;

/// Bijection between active pixel coordinates and `0..num_active`.
///
/// The forward map assigns consecutive indices to active pixels in row-major
/// scan order; the inverse table maps each index back to its `(row, col)`.
/// Both are built once and read-only afterwards, so equation ordering stays
/// reproducible across the whole pipeline.
#[derive(Clone, Debug)]
pub struct PixelIndexMap {
    h: usize,
    w: usize,
    forward: Vec<i32>,
    coords: Vec<(usize, usize)>,
}

impl PixelIndexMap {
    /// Scan the mask and build forward and inverse maps.
    pub fn build(mask: &MaskGrid) -> Self {
        let mut forward = vec![NO_INDEX; mask.h * mask.w];
        let mut coords = Vec::with_capacity(mask.count_active());
        for r in 0..mask.h {
            for c in 0..mask.w {
                if mask.is_active(r, c) {
                    forward[r * mask.w + c] = coords.len() as i32;
                    coords.push((r, c));
                }
            }
        }
        Self {
            h: mask.h,
            w: mask.w,
            forward,
            coords,
        }
    }

    /// Number of active pixels (length of the unknown vector).
    #[inline]
    pub fn num_active(&self) -> usize {
        self.coords.len()
    }

    /// Grid height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Grid width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    /// Dense index of the pixel at (row, col), or `None` if inactive.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        let v = self.forward[row * self.w + col];
        (v != NO_INDEX).then_some(v as usize)
    }

    /// Coordinates of the active pixel with dense index `idx`.
    #[inline]
    pub fn coords_of(&self, idx: usize) -> (usize, usize) {
        self.coords[idx]
    }

    /// Iterate over `(index, row, col)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.coords.iter().enumerate().map(|(i, &(r, c))| (i, r, c))
    }
}
