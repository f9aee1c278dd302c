//! # CAVERN Mesh
//!
//! Marching-squares surface extraction for CAVERN cave grids.
//!
//! Takes the binary [`cavern_map::Grid`] produced by the map pipeline and
//! turns it into renderable geometry:
//!
//! - [`lattice`]: the control-node lattice overlaid on the grid, one
//!   control node per cell plus shared edge midpoints.
//! - [`marching`]: the 16-case triangulation table and the mesh builder,
//!   with lazy vertex welding and planar UVs.
//! - [`outline`]: closed boundary loops of the triangulated surface, for
//!   wall extrusion and 2D collision.
//! - [`math`]: the small POD vector types the mesh is made of.
//!
//! The crate is deterministic end to end: the same grid and cell size
//! always produce byte-identical vertex and index buffers.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod lattice;
pub mod marching;
pub mod math;
pub mod outline;

pub use lattice::{CellPoint, NodeId, NodeLattice, SquareCell};
pub use marching::{build_mesh, CaveMesh, TILE_AMOUNT, TRIANGULATION};
pub use math::{Vec2, Vec3};
pub use outline::{boundary_edge_count, OutlineLoop, OutlineTracer};
