//! # Automaton Smoothing
//!
//! Majority-rule cellular automaton that turns random noise into cave
//! shapes.
//!
//! The update is **in place** over a single buffer, row-major: later cells
//! in a pass observe already-updated earlier cells. This is not a
//! classical synchronous automaton. The asymmetry is part of the
//! determinism contract - seeded outputs are pinned by tests, so neither
//! the order nor the buffering may change.

use crate::grid::{Cell, Grid};

/// Number of smoothing passes the pipeline applies.
pub const SMOOTHING_PASSES: usize = 5;

/// Runs one in-place smoothing pass.
///
/// Per cell: count Wall cells among the 8 neighbors, with out-of-bounds
/// neighbors counted as Wall. More than 4 makes the cell Wall, fewer than
/// 4 makes it Open, exactly 4 leaves it unchanged.
pub fn smooth_pass(grid: &mut Grid) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let walls = surrounding_wall_count(grid, x, y);
            grid.set(x, y, apply_rule(grid.get(x, y), walls));
        }
    }
}

/// The majority rule for one cell.
#[inline]
const fn apply_rule(current: Cell, walls: u32) -> Cell {
    if walls > 4 {
        Cell::Wall
    } else if walls < 4 {
        Cell::Open
    } else {
        current
    }
}

/// Counts Wall cells among the 8 neighbors of `(x, y)`.
///
/// Neighbors outside the grid count as Wall, which biases the automaton
/// toward sealing the map edge.
#[must_use]
fn surrounding_wall_count(grid: &Grid, x: i32, y: i32) -> u32 {
    let mut walls = 0;
    for ny in (y - 1)..=(y + 1) {
        for nx in (x - 1)..=(x + 1) {
            if nx == x && ny == y {
                continue;
            }
            if !grid.in_bounds(nx, ny) || grid.get(nx, ny).is_wall() {
                walls += 1;
            }
        }
    }
    walls
}
