//! # CAVERN
//!
//! Procedural cave generation: a seeded cellular-automaton layout, a
//! marching-squares surface mesh, and the closed outline loops of that
//! surface, all from one call.
//!
//! ```
//! use cavern::{generate, GenerationConfig};
//!
//! let cave = generate(&GenerationConfig::default()).unwrap();
//! assert!(cave.map.rooms.is_fully_connected());
//! assert_eq!(cave.mesh.vertex_count(), cave.mesh.uvs.len());
//! ```
//!
//! The heavy lifting lives in [`cavern_map`] (layout) and [`cavern_mesh`]
//! (geometry); this crate only orchestrates and re-exports. Generation is
//! deterministic: the same [`GenerationConfig`] always produces
//! byte-identical output, unless `use_random_seed` is set.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

use serde::{Deserialize, Serialize};
use tracing::info;

pub use cavern_map::{
    generate_map, Cell, Coord, Grid, MapConfig, MapData, MapError, MapResult, MapSeed, Region,
    Room, RoomGraph, RoomId, BORDER_PAD, REGION_THRESHOLD, SMOOTHING_PASSES,
};
pub use cavern_mesh::{
    boundary_edge_count, build_mesh, CaveMesh, OutlineLoop, OutlineTracer, Vec2, Vec3,
};

/// Everything `generate` needs: the layout parameters plus the world-space
/// size of one grid cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Layout parameters: dimensions, fill percent, seed.
    pub map: MapConfig,
    /// World-space edge length of one grid cell. Must be positive.
    pub cell_size: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            cell_size: 1.0,
        }
    }
}

/// A fully generated cave.
#[derive(Clone, Debug)]
pub struct CaveData {
    /// The padded layout grid and its room graph.
    pub map: MapData,
    /// The welded marching-squares surface.
    pub mesh: CaveMesh,
    /// Closed boundary loops of the surface, collinear vertices collapsed.
    pub outlines: Vec<OutlineLoop>,
}

/// Reusable generator.
///
/// Owns the outline tracer's scratch buffers, so embedders that generate
/// many caves in a row avoid re-allocating the adjacency map each time.
/// For one-off use, the free [`generate`] function does the same thing.
#[derive(Debug, Default)]
pub struct CaveGenerator {
    tracer: OutlineTracer,
}

impl CaveGenerator {
    /// Creates a generator with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the full pipeline: layout, mesh, outlines.
    ///
    /// A map whose every region fell below the survival threshold has no
    /// rooms; that is not an error. It yields an empty mesh and no
    /// outlines rather than a solid block of geometry.
    ///
    /// # Errors
    ///
    /// Returns the layout pipeline's [`MapError`] unchanged: invalid
    /// dimensions or fill percent, a degenerate region, or a room the
    /// connector could not reach.
    pub fn generate(&mut self, config: &GenerationConfig) -> MapResult<CaveData> {
        debug_assert!(
            config.cell_size.is_finite() && config.cell_size > 0.0,
            "cell_size must be positive"
        );

        let map = generate_map(&config.map)?;

        let (mesh, outlines) = if map.rooms.is_empty() {
            (CaveMesh::default(), Vec::new())
        } else {
            let mesh = build_mesh(&map.grid, config.cell_size);
            let outlines = self.tracer.trace(&mesh);
            (mesh, outlines)
        };

        info!(
            rooms = map.rooms.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            outlines = outlines.len(),
            "cave generated"
        );
        Ok(CaveData {
            map,
            mesh,
            outlines,
        })
    }
}

/// One-shot generation with throwaway scratch.
///
/// # Errors
///
/// Same as [`CaveGenerator::generate`].
pub fn generate(config: &GenerationConfig) -> MapResult<CaveData> {
    CaveGenerator::new().generate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_generates() {
        let cave = generate(&GenerationConfig::default()).unwrap();
        assert!(!cave.mesh.is_empty());
        assert!(!cave.outlines.is_empty());
        assert!(cave.map.rooms.is_fully_connected());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = GenerationConfig {
            cell_size: 2.0,
            ..GenerationConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
