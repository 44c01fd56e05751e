//! Owned single-channel f64 grid in row-major layout (stride == width).
//!
//! Used for depth maps: active pixels hold the solved depth, inactive pixels
//! keep the fill value (`NaN` for depth maps produced by the pipelines).
#[derive(Clone, Debug)]
pub struct GridF64 {
    /// Grid height in pixels (rows)
    pub h: usize,
    /// Grid width in pixels (columns)
    pub w: usize,
    /// Number of f64 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl GridF64 {
    /// Construct a zero-initialized buffer of size `h × w`.
    pub fn new(h: usize, w: usize) -> Self {
        Self::filled(h, w, 0.0)
    }

    /// Construct a buffer of size `h × w` filled with `value`.
    pub fn filled(h: usize, w: usize, value: f64) -> Self {
        Self {
            h,
            w,
            stride: w,
            data: vec![value; h * w],
        }
    }

    #[inline]
    /// Convert (row, col) to a linear index into `data`.
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.stride + col
    }

    #[inline]
    /// Get the value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.idx(row, col)]
    }

    #[inline]
    /// Set the value at (row, col).
    pub fn set(&mut self, row: usize, col: usize, v: f64) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }
}
