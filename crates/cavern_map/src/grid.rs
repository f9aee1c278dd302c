//! # Grid
//!
//! The binary cave grid every pipeline stage reads or rewrites.
//!
//! Storage is a flat row-major `Vec<Cell>`; coordinates are `i32` so
//! neighbor math can step outside the bounds without wrapping, with
//! `in_bounds` as the single range check.

use serde::{Deserialize, Serialize};

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Solid rock.
    Wall,
    /// Walkable cave interior.
    Open,
}

impl Cell {
    /// Returns `true` for [`Cell::Wall`].
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Returns the opposite cell state.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Wall => Self::Open,
            Self::Open => Self::Wall,
        }
    }
}

/// Integer tile coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Coord {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another coordinate.
    ///
    /// Distance comparisons in the pipeline never need the square root.
    #[inline]
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// The four orthogonal neighbor offsets, row-major order.
pub const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// A width x height cave grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `fill`.
    ///
    /// Dimensions must already be validated as strictly positive; see
    /// [`crate::synthesis::MapConfig::validate`].
    #[must_use]
    pub fn filled(width: i32, height: i32, fill: Cell) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![fill; len],
        }
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Returns `true` if `(x, y)` lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Returns `true` if `(x, y)` lies on the outermost ring.
    #[inline]
    #[must_use]
    pub const fn is_border(&self, x: i32, y: i32) -> bool {
        x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y));
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Reads the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Writes the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        let index = self.index(x, y);
        self.cells[index] = cell;
    }

    /// Iterates all coordinates in row-major order.
    ///
    /// Every scan in the pipeline uses this order; the in-place smoother's
    /// output depends on it, so it is part of the determinism contract.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Counts cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Raw row-major cell slice.
    ///
    /// Exposed for digest-style determinism tests and adapters.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns a copy of this grid surrounded by `pad` rings of Wall.
    ///
    /// The mesher consumes the padded grid so the triangulated surface is
    /// always closed at the map boundary.
    #[must_use]
    pub fn with_border(&self, pad: i32) -> Self {
        let mut padded = Self::filled(self.width + pad * 2, self.height + pad * 2, Cell::Wall);
        for coord in self.coords() {
            padded.set(coord.x + pad, coord.y + pad, self.get(coord.x, coord.y));
        }
        padded
    }
}
