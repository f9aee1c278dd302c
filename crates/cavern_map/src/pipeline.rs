//! # Map Pipeline
//!
//! Orchestrates one full generation: random fill, five smoothing passes,
//! noise pruning, room graph with guaranteed connectivity, and the final
//! Wall border pad the mesher relies on.
//!
//! One call is one complete, from-scratch recomputation. Nothing
//! incremental, nothing partial: on error the whole attempt is discarded.

use tracing::debug;

use crate::automaton::{smooth_pass, SMOOTHING_PASSES};
use crate::error::MapResult;
use crate::grid::Grid;
use crate::regions::prune_small_regions;
use crate::rooms::RoomGraph;
use crate::synthesis::{synthesize, MapConfig};

/// Width of the Wall ring added around the finished map.
pub const BORDER_PAD: i32 = 1;

/// The finished cave layout.
#[derive(Clone, Debug)]
pub struct MapData {
    /// The final grid, padded by [`BORDER_PAD`] rings of Wall.
    pub grid: Grid,
    /// The room graph; tile coordinates address `grid`.
    pub rooms: RoomGraph,
}

/// Runs the full cave-layout pipeline for `config`.
///
/// # Errors
///
/// Returns a validation error for malformed parameters, or
/// [`crate::MapError::UnreachableRoom`] /
/// [`crate::MapError::DegenerateRegion`] if the connectivity guarantee
/// cannot be met.
pub fn generate_map(config: &MapConfig) -> MapResult<MapData> {
    let seed = config.effective_seed();
    debug!(
        width = config.width,
        height = config.height,
        fill_percent = config.fill_percent,
        seed = seed.value(),
        "synthesizing grid"
    );
    let mut grid = synthesize(config, seed)?;

    for _ in 0..SMOOTHING_PASSES {
        smooth_pass(&mut grid);
    }

    let surviving = prune_small_regions(&mut grid);
    debug!(rooms = surviving.len(), "regions pruned");

    let mut rooms = RoomGraph::build(&grid, surviving)?;
    rooms.connect_closest_rooms()?;
    debug!(rooms = rooms.len(), "room graph connected");

    let grid = grid.with_border(BORDER_PAD);
    rooms.translate(BORDER_PAD, BORDER_PAD);

    Ok(MapData { grid, rooms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::seed::MapSeed;

    #[test]
    fn test_full_pipeline_connected_and_padded() {
        let config = MapConfig::new(72, 48, 46, MapSeed::new(20_240_817));
        let map = generate_map(&config).unwrap();

        assert_eq!(map.grid.width(), 72 + 2 * BORDER_PAD);
        assert_eq!(map.grid.height(), 48 + 2 * BORDER_PAD);
        for coord in map.grid.coords() {
            if map.grid.is_border(coord.x, coord.y) {
                assert_eq!(map.grid.get(coord.x, coord.y), Cell::Wall);
            }
        }

        assert!(map.rooms.is_fully_connected());
        for room in map.rooms.rooms() {
            assert!(room.size() >= crate::regions::REGION_THRESHOLD);
            for tile in &room.tiles {
                assert_eq!(
                    map.grid.get(tile.x, tile.y),
                    Cell::Open,
                    "room tiles must address the padded grid"
                );
            }
        }
    }

    #[test]
    fn test_determinism_byte_for_byte() {
        let config = MapConfig::new(64, 40, 44, MapSeed::from_text("cavern"));
        let a = generate_map(&config).unwrap();
        let b = generate_map(&config).unwrap();
        assert_eq!(a.grid.cells(), b.grid.cells());
    }

    #[test]
    fn test_random_seed_mode_usually_differs() {
        let config = MapConfig {
            use_random_seed: true,
            ..MapConfig::new(48, 32, 45, MapSeed::new(0))
        };
        let a = generate_map(&config).unwrap();
        let b = generate_map(&config).unwrap();
        let c = generate_map(&config).unwrap();
        // Three entropy-seeded maps all colliding is astronomically
        // unlikely; accept one collision to keep the test stable.
        let all_equal = a.grid.cells() == b.grid.cells() && b.grid.cells() == c.grid.cells();
        assert!(!all_equal, "entropy seeds should produce different maps");
    }
}
