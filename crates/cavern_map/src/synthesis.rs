//! # Grid Synthesis
//!
//! Seeded random fill with a forced Wall border.
//!
//! The fill draws one uniform value in `[0, 100)` per interior cell from a
//! `ChaCha8` stream, in row-major order. The draw order is fixed: changing
//! it would remap the stream and silently break every pinned seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};
use crate::grid::{Cell, Grid};
use crate::seed::MapSeed;

/// Parameters for one map generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Grid width in cells. Must be > 0.
    pub width: i32,
    /// Grid height in cells. Must be > 0.
    pub height: i32,
    /// Probability (percent) that an interior cell starts as Wall.
    pub fill_percent: u32,
    /// Seed for the deterministic stream.
    pub seed: MapSeed,
    /// When set, `seed` is ignored and a fresh seed is drawn from OS
    /// entropy each generation. Reproducibility is intentionally broken.
    pub use_random_seed: bool,
}

impl MapConfig {
    /// Creates a config with a fixed seed.
    #[must_use]
    pub const fn new(width: i32, height: i32, fill_percent: u32, seed: MapSeed) -> Self {
        Self {
            width,
            height,
            fill_percent,
            seed,
            use_random_seed: false,
        }
    }

    /// Validates dimensions and fill percentage.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDimensions`] if either dimension is not
    /// strictly positive, [`MapError::InvalidFillPercent`] if the fill
    /// percentage exceeds 100.
    pub fn validate(&self) -> MapResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percent > 100 {
            return Err(MapError::InvalidFillPercent(self.fill_percent));
        }
        Ok(())
    }

    /// Resolves the seed that this generation will actually use.
    #[must_use]
    pub fn effective_seed(&self) -> MapSeed {
        if self.use_random_seed {
            MapSeed::from_entropy()
        } else {
            self.seed
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(72, 48, 47, MapSeed::default())
    }
}

/// Builds the raw random grid for `config`.
///
/// Border cells are forced Wall; each interior cell is Wall iff a uniform
/// draw in `[0, 100)` is below `fill_percent`.
///
/// # Errors
///
/// Returns a validation error for malformed dimensions or fill percentage.
pub fn synthesize(config: &MapConfig, seed: MapSeed) -> MapResult<Grid> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
    let mut grid = Grid::filled(config.width, config.height, Cell::Wall);

    for y in 0..config.height {
        for x in 0..config.width {
            let cell = if grid.is_border(x, y) {
                Cell::Wall
            } else if rng.gen_range(0_u32..100) < config.fill_percent {
                Cell::Wall
            } else {
                Cell::Open
            };
            grid.set(x, y, cell);
        }
    }

    Ok(grid)
}
