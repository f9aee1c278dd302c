//! # Region Analysis
//!
//! 4-connected component extraction and noise pruning.
//!
//! A region is one connected component of same-state cells under N/S/E/W
//! adjacency. Components below [`REGION_THRESHOLD`] tiles are flipped to
//! the opposite state: small wall specks open up, small open pockets are
//! sealed. What survives as Open becomes the candidate rooms.

use std::collections::VecDeque;

use crate::grid::{Cell, Coord, Grid, ORTHOGONAL_OFFSETS};

/// Minimum tile count for a region (wall or open) to survive pruning.
pub const REGION_THRESHOLD: usize = 50;

/// One 4-connected component of same-state cells.
///
/// Tiles are ordered by BFS dequeue order from the component's row-major
/// discovery point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// The component's tiles.
    pub tiles: Vec<Coord>,
}

impl Region {
    /// Number of tiles in the region.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the region has no tiles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Extracts every region of cells equal to `cell`.
///
/// Row-major scan; each unvisited matching cell seeds a breadth-first
/// flood fill restricted to 4-connectivity and to `cell`. The visited map
/// is fresh per call and scoped to `cell`: cells of the other state are
/// never visited or returned.
#[must_use]
pub fn regions(grid: &Grid, cell: Cell) -> Vec<Region> {
    let mut found = Vec::new();
    let mut visited = vec![false; (grid.width() as usize) * (grid.height() as usize)];

    for start in grid.coords() {
        let index = flat_index(grid, start);
        if visited[index] || grid.get(start.x, start.y) != cell {
            continue;
        }
        found.push(flood_fill(grid, &mut visited, start, cell));
    }

    found
}

/// BFS flood fill from `start` over cells equal to `cell`.
///
/// Tiles are recorded in dequeue order; cells are marked visited when
/// enqueued so nothing is queued twice.
fn flood_fill(grid: &Grid, visited: &mut [bool], start: Coord, cell: Cell) -> Region {
    let mut tiles = Vec::new();
    let mut queue = VecDeque::new();

    visited[flat_index(grid, start)] = true;
    queue.push_back(start);

    while let Some(tile) = queue.pop_front() {
        tiles.push(tile);

        for (dx, dy) in ORTHOGONAL_OFFSETS {
            let next = Coord::new(tile.x + dx, tile.y + dy);
            if !grid.in_bounds(next.x, next.y) || grid.get(next.x, next.y) != cell {
                continue;
            }
            let index = flat_index(grid, next);
            if !visited[index] {
                visited[index] = true;
                queue.push_back(next);
            }
        }
    }

    Region { tiles }
}

/// Prunes undersized regions of both states and returns the surviving
/// Open regions (candidate rooms).
///
/// Wall regions below the threshold are opened first, then Open regions
/// below the threshold are sealed. An empty result is valid: a map whose
/// open area never reaches the threshold simply has no rooms.
#[must_use]
pub fn prune_small_regions(grid: &mut Grid) -> Vec<Region> {
    for region in regions(grid, Cell::Wall) {
        if region.len() < REGION_THRESHOLD {
            flip(grid, &region, Cell::Open);
        }
    }

    let mut surviving = Vec::new();
    for region in regions(grid, Cell::Open) {
        if region.len() < REGION_THRESHOLD {
            flip(grid, &region, Cell::Wall);
        } else {
            surviving.push(region);
        }
    }
    surviving
}

fn flip(grid: &mut Grid, region: &Region, to: Cell) {
    for tile in &region.tiles {
        grid.set(tile.x, tile.y, to);
    }
}

#[inline]
fn flat_index(grid: &Grid, coord: Coord) -> usize {
    (coord.y as usize) * (grid.width() as usize) + (coord.x as usize)
}
