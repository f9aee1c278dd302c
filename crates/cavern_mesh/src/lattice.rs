//! # Control-Node Lattice
//!
//! Marching squares triangulates between three families of nodes: one
//! control node per grid cell plus the midpoints to its right and above.
//! Neighboring square cells must agree on their shared midpoints, or the
//! mesh tears at every cell boundary.
//!
//! Instead of aliased references, the lattice is one flat arena addressed
//! by `(x, y, role)`: cell `(x, y)`'s right midpoint *is* - by id math,
//! not by pointer identity - cell `(x + 1, y)`'s left midpoint. Any two
//! adjacent cells deterministically resolve to the same node, so welding
//! falls out of the addressing scheme.
//!
//! Every node also carries its half-step lattice coordinate: positions
//! live on a grid of `cell_size / 2` steps, so an exact integer pair is
//! available wherever float comparisons would be fragile.

use cavern_map::Grid;

use crate::math::Vec3;

/// Index of a node in its [`NodeLattice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The eight points of a square cell, in the order the triangulation
/// table names them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellPoint {
    /// Corner control node, top left.
    TopLeft,
    /// Midpoint of the top edge.
    CenterTop,
    /// Corner control node, top right.
    TopRight,
    /// Midpoint of the right edge.
    CenterRight,
    /// Corner control node, bottom right.
    BottomRight,
    /// Midpoint of the bottom edge.
    CenterBottom,
    /// Corner control node, bottom left.
    BottomLeft,
    /// Midpoint of the left edge.
    CenterLeft,
}

/// One square cell: four corner control nodes, four shared midpoints and
/// the 4-bit configuration derived from corner activity.
#[derive(Clone, Copy, Debug)]
pub struct SquareCell {
    /// `topLeft * 8 + topRight * 4 + bottomRight * 2 + bottomLeft * 1`.
    pub configuration: u8,
    nodes: [NodeId; 8],
}

impl SquareCell {
    /// Resolves one of the cell's points to its lattice node.
    #[inline]
    #[must_use]
    pub const fn node(&self, point: CellPoint) -> NodeId {
        self.nodes[point as usize]
    }
}

/// Flat arena of mesh nodes over a grid.
///
/// Control nodes are `active` where the grid cell is Wall. Vertex indices
/// are assigned lazily by the mesher and stable once set.
pub struct NodeLattice {
    width: i32,
    height: i32,
    active: Vec<bool>,
    positions: Vec<Vec3>,
    lattice_coords: Vec<[i32; 2]>,
    vertex_indices: Vec<Option<u32>>,
}

impl NodeLattice {
    /// Builds the lattice for `grid` with squares of `cell_size`.
    #[must_use]
    pub fn new(grid: &Grid, cell_size: f32) -> Self {
        let width = grid.width();
        let height = grid.height();
        let node_count = (width as usize) * (height as usize) * 3;

        #[allow(clippy::cast_precision_loss)]
        let map_width = width as f32 * cell_size;
        #[allow(clippy::cast_precision_loss)]
        let map_height = height as f32 * cell_size;
        let half = cell_size / 2.0;

        let mut active = Vec::with_capacity(node_count / 3);
        let mut positions = vec![Vec3::default(); node_count];
        let mut lattice_coords = vec![[0, 0]; node_count];

        for y in 0..height {
            for x in 0..width {
                active.push(grid.get(x, y).is_wall());

                #[allow(clippy::cast_precision_loss)]
                let pos = Vec3::new(
                    -map_width / 2.0 + (x as f32 + 0.5) * cell_size,
                    0.0,
                    -map_height / 2.0 + (y as f32 + 0.5) * cell_size,
                );
                let control = Self::control_index(width, x, y);
                let right = Self::right_index(width, height, x, y);
                let above = Self::above_index(width, height, x, y);

                positions[control] = pos;
                positions[right] = Vec3::new(pos.x + half, pos.y, pos.z);
                positions[above] = Vec3::new(pos.x, pos.y, pos.z + half);

                lattice_coords[control] = [2 * x + 1, 2 * y + 1];
                lattice_coords[right] = [2 * x + 2, 2 * y + 1];
                lattice_coords[above] = [2 * x + 1, 2 * y + 2];
            }
        }

        Self {
            width,
            height,
            active,
            positions,
            lattice_coords,
            vertex_indices: vec![None; node_count],
        }
    }

    #[inline]
    fn control_index(width: i32, x: i32, y: i32) -> usize {
        (y as usize) * (width as usize) + (x as usize)
    }

    #[inline]
    fn right_index(width: i32, height: i32, x: i32, y: i32) -> usize {
        (width as usize) * (height as usize) + Self::control_index(width, x, y)
    }

    #[inline]
    fn above_index(width: i32, height: i32, x: i32, y: i32) -> usize {
        2 * (width as usize) * (height as usize) + Self::control_index(width, x, y)
    }

    /// The control node of cell `(x, y)`.
    #[inline]
    #[must_use]
    pub fn control(&self, x: i32, y: i32) -> NodeId {
        NodeId(Self::control_index(self.width, x, y))
    }

    /// The midpoint node to the right of control `(x, y)`.
    #[inline]
    #[must_use]
    pub fn right(&self, x: i32, y: i32) -> NodeId {
        NodeId(Self::right_index(self.width, self.height, x, y))
    }

    /// The midpoint node above control `(x, y)`.
    #[inline]
    #[must_use]
    pub fn above(&self, x: i32, y: i32) -> NodeId {
        NodeId(Self::above_index(self.width, self.height, x, y))
    }

    /// Number of square cells per row.
    #[inline]
    #[must_use]
    pub const fn square_columns(&self) -> i32 {
        self.width - 1
    }

    /// Number of square cell rows.
    #[inline]
    #[must_use]
    pub const fn square_rows(&self) -> i32 {
        self.height - 1
    }

    /// The square cell whose bottom-left control node is `(x, y)`.
    ///
    /// Valid for `x` in `0..square_columns()`, `y` in `0..square_rows()`.
    #[must_use]
    pub fn square(&self, x: i32, y: i32) -> SquareCell {
        let bottom_left = self.control(x, y);
        let bottom_right = self.control(x + 1, y);
        let top_left = self.control(x, y + 1);
        let top_right = self.control(x + 1, y + 1);

        let mut configuration = 0;
        if self.active[top_left.0] {
            configuration += 8;
        }
        if self.active[top_right.0] {
            configuration += 4;
        }
        if self.active[bottom_right.0] {
            configuration += 2;
        }
        if self.active[bottom_left.0] {
            configuration += 1;
        }

        SquareCell {
            configuration,
            nodes: [
                top_left,
                self.right(x, y + 1),  // center top
                top_right,
                self.above(x + 1, y),  // center right
                bottom_right,
                self.right(x, y),      // center bottom
                bottom_left,
                self.above(x, y),      // center left
            ],
        }
    }

    /// World position of a node.
    #[inline]
    #[must_use]
    pub fn position(&self, node: NodeId) -> Vec3 {
        self.positions[node.0]
    }

    /// Half-step lattice coordinate of a node.
    #[inline]
    #[must_use]
    pub fn lattice_coord(&self, node: NodeId) -> [i32; 2] {
        self.lattice_coords[node.0]
    }

    /// The node's vertex index, if one was assigned.
    #[inline]
    #[must_use]
    pub fn vertex_index(&self, node: NodeId) -> Option<u32> {
        self.vertex_indices[node.0]
    }

    /// Records the node's vertex index. Assigned once, reused forever.
    #[inline]
    pub fn set_vertex_index(&mut self, node: NodeId, index: u32) {
        debug_assert!(self.vertex_indices[node.0].is_none());
        self.vertex_indices[node.0] = Some(index);
    }
}
