//! Masked pixel domain: dense indexing and neighbor classification.
//!
//! Every later stage works on a 1D unknown vector with one entry per active
//! pixel. [`PixelIndexMap`] fixes the bijection between 2D pixel coordinates
//! and that 1D index in a deterministic row-major scan order, together with
//! its inverse (index → coordinate) built once up front.
//!
//! [`AxisCase`] classifies each active pixel per axis by which of its two
//! axis neighbors are active; the orthographic operators pick their
//! finite-difference stencils from it. [`adjacency`] builds the per-pixel
//! active-neighbor lists used by the perspective plane-fitting assembler.

mod index_map;
mod neighbors;

pub use index_map::PixelIndexMap;
pub use neighbors::{adjacency, AxisCase};
