//! # Marching Squares
//!
//! Triangulates the wall mass of a padded cave grid.
//!
//! Each square cell's 4-bit configuration selects an ordered polygon of
//! corner and midpoint nodes from a fixed 16-entry table; the polygon is
//! fan-triangulated from its first point. Configurations 0 and 15 are the
//! degenerate empty/full cases. The winding order of every entry is part
//! of the mesh contract - downstream outline tracing and wall extrusion
//! assume it.

use cavern_map::Grid;
use tracing::debug;

use crate::lattice::{CellPoint, NodeLattice, SquareCell};
use crate::math::{Vec2, Vec3};

/// How many times the texture tiles across the map extent.
pub const TILE_AMOUNT: f32 = 10.0;

use CellPoint::{
    BottomLeft, BottomRight, CenterBottom, CenterLeft, CenterRight, CenterTop, TopLeft, TopRight,
};

/// Ordered polygon for each of the 16 corner configurations.
///
/// Bit order: topLeft 8, topRight 4, bottomRight 2, bottomLeft 1. Every
/// polygon walks its points in the same winding so fan triangulation
/// yields consistently oriented triangles.
pub const TRIANGULATION: [&[CellPoint]; 16] = [
    // 0: empty
    &[],
    // 1 point:
    &[CenterLeft, CenterBottom, BottomLeft],
    &[BottomRight, CenterBottom, CenterRight],
    &[CenterRight, BottomRight, BottomLeft, CenterLeft],
    &[TopRight, CenterRight, CenterTop],
    // 5: diagonal case, two opposite corners
    &[CenterTop, TopRight, CenterRight, CenterBottom, BottomLeft, CenterLeft],
    &[CenterTop, TopRight, BottomRight, CenterBottom],
    &[CenterTop, TopRight, BottomRight, BottomLeft, CenterLeft],
    // 8:
    &[TopLeft, CenterTop, CenterLeft],
    &[TopLeft, CenterTop, CenterBottom, BottomLeft],
    // 10: the other diagonal
    &[TopLeft, CenterTop, CenterRight, BottomRight, CenterBottom, CenterLeft],
    &[TopLeft, CenterTop, CenterRight, BottomRight, BottomLeft],
    &[TopLeft, TopRight, CenterRight, CenterLeft],
    &[TopLeft, TopRight, CenterRight, CenterBottom, BottomLeft],
    &[TopLeft, TopRight, BottomRight, CenterBottom, CenterLeft],
    // 15: full
    &[TopLeft, TopRight, BottomRight, BottomLeft],
];

/// The triangulated cave surface.
///
/// Vertices are welded: every lattice node contributes at most one entry
/// to `positions`, no matter how many triangles reference it.
#[derive(Clone, Debug, Default)]
pub struct CaveMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle index triples into `positions`, consistent winding.
    pub triangles: Vec<[u32; 3]>,
    /// Texture coordinates, one per vertex.
    pub uvs: Vec<Vec2>,
    /// Exact half-step lattice coordinate per vertex.
    ///
    /// Positions are floats; these integers are the same points in
    /// `cell_size / 2` units, for consumers that need exact collinearity
    /// or cell-space addressing.
    pub lattice_coords: Vec<[i32; 2]>,
}

impl CaveMesh {
    /// Number of welded vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh has no geometry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Triangulates `grid` (already padded with a Wall border) into a mesh.
///
/// Vertex indices are assigned lazily: a node gets its index the first
/// time any triangle references it and every later reference reuses it.
#[must_use]
pub fn build_mesh(grid: &Grid, cell_size: f32) -> CaveMesh {
    let mut lattice = NodeLattice::new(grid, cell_size);
    let mut mesh = CaveMesh::default();

    for y in 0..lattice.square_rows() {
        for x in 0..lattice.square_columns() {
            triangulate_square(&lattice.square(x, y), &mut lattice, &mut mesh);
        }
    }

    compute_uvs(&mut mesh, grid, cell_size);
    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "mesh triangulated"
    );
    mesh
}

/// Emits the fan triangulation for one square cell.
fn triangulate_square(square: &SquareCell, lattice: &mut NodeLattice, mesh: &mut CaveMesh) {
    let polygon = TRIANGULATION[square.configuration as usize];

    let mut indices = [0_u32; 6];
    for (slot, point) in indices.iter_mut().zip(polygon.iter()) {
        *slot = ensure_vertex(lattice, mesh, square, *point);
    }

    for i in 2..polygon.len() {
        mesh.triangles.push([indices[0], indices[i - 1], indices[i]]);
    }
}

/// Resolves a cell point to its welded vertex index, assigning one on
/// first reference.
fn ensure_vertex(
    lattice: &mut NodeLattice,
    mesh: &mut CaveMesh,
    square: &SquareCell,
    point: CellPoint,
) -> u32 {
    let node = square.node(point);
    if let Some(index) = lattice.vertex_index(node) {
        return index;
    }

    #[allow(clippy::cast_possible_truncation)]
    let index = mesh.positions.len() as u32;
    mesh.positions.push(lattice.position(node));
    mesh.lattice_coords.push(lattice.lattice_coord(node));
    lattice.set_vertex_index(node, index);
    index
}

/// Derives texture coordinates by mapping each vertex's planar position
/// into a fixed tiling range over the map extent.
///
/// Both axes map over the *width* extent; on non-square maps V simply
/// tiles past 1.
fn compute_uvs(mesh: &mut CaveMesh, grid: &Grid, cell_size: f32) {
    #[allow(clippy::cast_precision_loss)]
    let half_extent = grid.width() as f32 / 2.0 * cell_size;

    mesh.uvs = mesh
        .positions
        .iter()
        .map(|position| {
            let u = inverse_lerp(-half_extent, half_extent, position.x) * TILE_AMOUNT;
            let v = inverse_lerp(-half_extent, half_extent, position.z) * TILE_AMOUNT;
            Vec2::new(u, v)
        })
        .collect();
}

#[inline]
fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    (value - a) / (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_map::{Cell, Grid};

    fn wall_block_grid() -> Grid {
        // 4x4 all Wall: every square is configuration 15.
        Grid::filled(4, 4, Cell::Wall)
    }

    #[test]
    fn test_table_shape() {
        assert!(TRIANGULATION[0].is_empty());
        assert_eq!(TRIANGULATION[15].len(), 4);
        for (config, polygon) in TRIANGULATION.iter().enumerate() {
            let corners = config.count_ones();
            // One active corner yields a triangle, two yield a quad or a
            // six-point band, three a pentagon, four the full quad.
            match corners {
                0 => assert!(polygon.is_empty()),
                1 => assert_eq!(polygon.len(), 3),
                2 => assert!(polygon.len() == 4 || polygon.len() == 6),
                3 => assert_eq!(polygon.len(), 5),
                _ => assert_eq!(polygon.len(), 4),
            }
        }
    }

    #[test]
    fn test_open_grid_meshes_empty() {
        let mesh = build_mesh(&Grid::filled(4, 4, Cell::Open), 1.0);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn test_full_grid_welds_shared_corners() {
        let mesh = build_mesh(&wall_block_grid(), 1.0);

        // 9 squares of configuration 15 share their corner control
        // nodes: a 4x4 node grid means exactly 16 vertices, and each
        // square contributes 2 triangles.
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 18);
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
        assert_eq!(mesh.lattice_coords.len(), mesh.vertex_count());

        // Every triangle index is in range.
        for triangle in &mesh.triangles {
            for index in triangle {
                assert!((*index as usize) < mesh.vertex_count());
            }
        }
    }

    #[test]
    fn test_single_wall_cell_triangle_counts() {
        // One active cell in the middle of a 3x3 open grid produces four
        // corner-case squares around it (configs 1, 2, 4, 8).
        let mut grid = Grid::filled(3, 3, Cell::Open);
        grid.set(1, 1, Cell::Wall);
        let mesh = build_mesh(&grid, 1.0);

        assert_eq!(mesh.triangle_count(), 4);
        // The active control node plus its 4 midpoints; each midpoint is
        // referenced by two of the squares but welded to one vertex.
        assert_eq!(mesh.vertex_count(), 5);
    }

    #[test]
    fn test_uv_range_spans_tiling() {
        let mesh = build_mesh(&wall_block_grid(), 1.0);
        for uv in &mesh.uvs {
            assert!(uv.x >= 0.0 && uv.x <= TILE_AMOUNT);
            assert!(uv.y >= 0.0 && uv.y <= TILE_AMOUNT);
        }
    }
}
