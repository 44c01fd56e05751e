//! Binary mask over the pixel grid selecting active pixels.

/// H×W boolean grid; `true` marks a pixel that carries a valid normal and
/// participates in the reconstruction.
#[derive(Clone, Debug)]
pub struct MaskGrid {
    /// Grid height in pixels (rows)
    pub h: usize,
    /// Grid width in pixels (columns)
    pub w: usize,
    /// Elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<bool>,
}

impl MaskGrid {
    /// All-inactive mask of size `h × w`.
    pub fn new(h: usize, w: usize) -> Self {
        Self {
            h,
            w,
            stride: w,
            data: vec![false; h * w],
        }
    }

    /// Build a mask by evaluating `f(row, col)` at every pixel.
    pub fn from_fn(h: usize, w: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(h, w);
        for r in 0..h {
            for c in 0..w {
                let i = mask.idx(r, c);
                mask.data[i] = f(r, c);
            }
        }
        mask
    }

    #[inline]
    /// Convert (row, col) to a linear index into `data`.
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.stride + col
    }

    #[inline]
    /// Whether the pixel at (row, col) is active.
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.data[self.idx(row, col)]
    }

    #[inline]
    /// Set the pixel at (row, col).
    pub fn set(&mut self, row: usize, col: usize, active: bool) {
        let i = self.idx(row, col);
        self.data[i] = active;
    }

    /// Number of active pixels.
    pub fn count_active(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Bounds-checked neighbor probe: whether the pixel at
    /// `(row + dr, col + dc)` exists and is active. Out-of-bounds counts as
    /// inactive, so no padding allocation is needed.
    #[inline]
    pub fn neighbor_active(&self, row: usize, col: usize, dr: isize, dc: isize) -> bool {
        let r = row as isize + dr;
        let c = col as isize + dc;
        if r < 0 || c < 0 || r >= self.h as isize || c >= self.w as isize {
            return false;
        }
        self.is_active(r as usize, c as usize)
    }
}
