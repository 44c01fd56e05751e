//! Triangulated surface assembly from a depth map and the masked domain.
//!
//! Vertices follow the dense pixel-index order exactly (one vertex per
//! active pixel), so facet construction only needs the index map. A 2×2
//! block of pixels produces two triangles when all four corners are active,
//! one triangle when exactly three are, and nothing otherwise.

use nalgebra::{Point3, Vector3};

use crate::domain::PixelIndexMap;
use crate::grid::GridF64;

/// Vertex positions plus triangle connectivity.
///
/// `triangles` holds indices into `vertices`; `vertices[i]` belongs to the
/// active pixel with dense index `i`. The mesh is derived data and is never
/// edited after construction.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<[usize; 3]>,
}

/// Triangulate every 2×2 block of active pixels.
///
/// Blocks are visited in row-major order; within a fully active block the
/// diagonal runs from the top-left to the bottom-right corner.
pub fn facets_from_index_map(index: &PixelIndexMap) -> Vec<[usize; 3]> {
    let mut triangles = Vec::new();
    if index.height() == 0 || index.width() == 0 {
        return triangles;
    }
    for r in 0..index.height() - 1 {
        for c in 0..index.width() - 1 {
            let tl = index.index_of(r, c);
            let tr = index.index_of(r, c + 1);
            let bl = index.index_of(r + 1, c);
            let br = index.index_of(r + 1, c + 1);
            match (tl, tr, bl, br) {
                (Some(tl), Some(tr), Some(bl), Some(br)) => {
                    triangles.push([tl, bl, br]);
                    triangles.push([tl, br, tr]);
                }
                (None, Some(tr), Some(bl), Some(br)) => triangles.push([bl, br, tr]),
                (Some(tl), None, Some(bl), Some(br)) => triangles.push([tl, bl, br]),
                (Some(tl), Some(tr), None, Some(br)) => triangles.push([tl, br, tr]),
                (Some(tl), Some(tr), Some(bl), None) => triangles.push([tl, bl, tr]),
                _ => {}
            }
        }
    }
    triangles
}

/// Orthographic vertices: `(row·s, col·s, depth)` per active pixel.
pub fn vertices_from_depth_map(
    index: &PixelIndexMap,
    depth_map: &GridF64,
    step_size: f64,
) -> Vec<Point3<f64>> {
    index
        .iter()
        .map(|(_, r, c)| {
            Point3::new(
                r as f64 * step_size,
                c as f64 * step_size,
                depth_map.get(r, c),
            )
        })
        .collect()
}

/// Perspective vertices: each camera ray scaled by its solved depth.
pub fn vertices_from_rays(rays: &[Vector3<f64>], depths: &[f64]) -> Vec<Point3<f64>> {
    rays.iter()
        .zip(depths.iter())
        .map(|(ray, &z)| Point3::from(ray * z))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MaskGrid;

    fn map_of(mask: &MaskGrid) -> PixelIndexMap {
        PixelIndexMap::build(mask)
    }

    #[test]
    fn full_block_produces_two_triangles() {
        let mask = MaskGrid::from_fn(2, 2, |_, _| true);
        let tris = facets_from_index_map(&map_of(&mask));
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[0], [0, 2, 3]);
        assert_eq!(tris[1], [0, 3, 1]);
    }

    #[test]
    fn three_corner_block_produces_one_triangle() {
        for missing in 0..4 {
            let mask = MaskGrid::from_fn(2, 2, |r, c| 2 * r + c != missing);
            let tris = facets_from_index_map(&map_of(&mask));
            assert_eq!(tris.len(), 1, "missing corner {missing}");
            // all three referenced vertices are distinct and in range
            let t = tris[0];
            assert!(t[0] != t[1] && t[1] != t[2] && t[0] != t[2]);
            assert!(t.iter().all(|&v| v < 3));
        }
    }

    #[test]
    fn sparse_blocks_produce_no_facets() {
        // diagonal pair only
        let mask = MaskGrid::from_fn(2, 2, |r, c| r == c);
        assert!(facets_from_index_map(&map_of(&mask)).is_empty());

        let mask = MaskGrid::from_fn(2, 2, |r, c| r == 0 && c == 0);
        assert!(facets_from_index_map(&map_of(&mask)).is_empty());
    }

    #[test]
    fn larger_grid_counts_add_up() {
        // 3x3 fully active: 4 blocks, 8 triangles
        let mask = MaskGrid::from_fn(3, 3, |_, _| true);
        assert_eq!(facets_from_index_map(&map_of(&mask)).len(), 8);
    }

    #[test]
    fn orthographic_vertices_follow_index_order() {
        let mask = MaskGrid::from_fn(2, 2, |r, c| !(r == 1 && c == 1));
        let index = map_of(&mask);
        let mut depth = GridF64::filled(2, 2, f64::NAN);
        depth.set(0, 0, 1.0);
        depth.set(0, 1, 2.0);
        depth.set(1, 0, 3.0);

        let verts = vertices_from_depth_map(&index, &depth, 2.0);
        assert_eq!(verts.len(), 3);
        assert_eq!(verts[0], Point3::new(0.0, 0.0, 1.0));
        assert_eq!(verts[1], Point3::new(0.0, 2.0, 2.0));
        assert_eq!(verts[2], Point3::new(2.0, 0.0, 3.0));
    }

    #[test]
    fn ray_vertices_scale_elementwise() {
        let rays = vec![Vector3::new(0.5, -0.5, 1.0)];
        let verts = vertices_from_rays(&rays, &[4.0]);
        assert_eq!(verts[0], Point3::new(2.0, -2.0, 4.0));
    }
}
