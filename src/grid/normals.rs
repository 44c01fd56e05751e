//! Per-pixel surface normal storage.

use nalgebra::Vector3;

/// H×W grid of 3-vectors in row-major layout, three interleaved components
/// per pixel. Normals are only meaningful at active pixels of the
/// accompanying mask and are assumed unit length there.
#[derive(Clone, Debug)]
pub struct NormalGrid {
    /// Grid height in pixels (rows)
    pub h: usize,
    /// Grid width in pixels (columns)
    pub w: usize,
    /// Backing storage: `[nx, ny, nz]` per pixel, row-major
    pub data: Vec<f64>,
}

impl NormalGrid {
    /// Construct a zero-filled normal grid of size `h × w`.
    pub fn new(h: usize, w: usize) -> Self {
        Self {
            h,
            w,
            data: vec![0.0; h * w * 3],
        }
    }

    /// Build a normal grid by evaluating `f(row, col)` at every pixel.
    pub fn from_fn(h: usize, w: usize, mut f: impl FnMut(usize, usize) -> Vector3<f64>) -> Self {
        let mut grid = Self::new(h, w);
        for r in 0..h {
            for c in 0..w {
                grid.set(r, c, f(r, c));
            }
        }
        grid
    }

    #[inline]
    fn base(&self, row: usize, col: usize) -> usize {
        (row * self.w + col) * 3
    }

    #[inline]
    /// Get the normal at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Vector3<f64> {
        let i = self.base(row, col);
        Vector3::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    #[inline]
    /// Set the normal at (row, col).
    pub fn set(&mut self, row: usize, col: usize, n: Vector3<f64>) {
        let i = self.base(row, col);
        self.data[i] = n.x;
        self.data[i + 1] = n.y;
        self.data[i + 2] = n.z;
    }
}
