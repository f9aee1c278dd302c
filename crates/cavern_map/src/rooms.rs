//! # Room Graph
//!
//! Rooms are the open regions that survive pruning, held in an arena and
//! addressed by [`RoomId`]. Connections are index pairs, mutual, and the
//! accessibility flag floods through the graph with an iterative worklist
//! rather than recursion, so pathological maps cannot blow the stack.
//!
//! ## Connectivity guarantee
//!
//! After [`RoomGraph::connect_closest_rooms`] succeeds, every room is
//! reachable from the main room. Anything less is a hard
//! [`MapError::UnreachableRoom`] - a disconnected map is never returned.

use std::collections::VecDeque;

use crate::error::{MapError, MapResult};
use crate::grid::{Cell, Coord, Grid, ORTHOGONAL_OFFSETS};
use crate::regions::Region;

/// Index of a room in its [`RoomGraph`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoomId(usize);

impl RoomId {
    /// Arena index of the room.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One room: a surviving open region tracked as a connectivity node.
///
/// Rooms are created once per generation and never resized.
#[derive(Clone, Debug)]
pub struct Room {
    /// All tiles of the room, in region order.
    pub tiles: Vec<Coord>,
    /// Tiles with at least one Wall among their 4 orthogonal neighbors.
    ///
    /// Candidate endpoints for inter-room passages.
    pub edge_tiles: Vec<Coord>,
    connections: Vec<RoomId>,
    is_main: bool,
    accessible_from_main: bool,
}

impl Room {
    fn from_region(region: Region, grid: &Grid) -> MapResult<Self> {
        if region.is_empty() {
            return Err(MapError::DegenerateRegion);
        }

        let edge_tiles = region
            .tiles
            .iter()
            .copied()
            .filter(|tile| {
                ORTHOGONAL_OFFSETS.iter().any(|(dx, dy)| {
                    let (nx, ny) = (tile.x + dx, tile.y + dy);
                    grid.in_bounds(nx, ny) && grid.get(nx, ny) == Cell::Wall
                })
            })
            .collect();

        Ok(Self {
            tiles: region.tiles,
            edge_tiles,
            connections: Vec::new(),
            is_main: false,
            accessible_from_main: false,
        })
    }

    /// Number of tiles in the room.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` for the largest room of the map.
    #[inline]
    #[must_use]
    pub const fn is_main(&self) -> bool {
        self.is_main
    }

    /// Returns `true` once the room is reachable from the main room.
    #[inline]
    #[must_use]
    pub const fn is_accessible_from_main(&self) -> bool {
        self.accessible_from_main
    }

    /// Rooms directly connected to this one.
    #[inline]
    #[must_use]
    pub fn connections(&self) -> &[RoomId] {
        &self.connections
    }

    /// Returns `true` if `other` is directly connected to this room.
    #[inline]
    #[must_use]
    pub fn is_connected_to(&self, other: RoomId) -> bool {
        self.connections.contains(&other)
    }
}

/// The rooms of one generation plus their undirected connection relation.
#[derive(Clone, Debug, Default)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    /// Builds the graph from surviving open regions.
    ///
    /// Rooms are sorted descending by tile count (stable, so equal-sized
    /// rooms keep their discovery order) and the largest becomes the main
    /// room, flagged accessible from the start.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DegenerateRegion`] if any region is empty.
    pub fn build(grid: &Grid, regions: Vec<Region>) -> MapResult<Self> {
        let mut rooms = regions
            .into_iter()
            .map(|region| Room::from_region(region, grid))
            .collect::<MapResult<Vec<_>>>()?;

        rooms.sort_by(|a, b| b.tiles.len().cmp(&a.tiles.len()));

        if let Some(main) = rooms.first_mut() {
            main.is_main = true;
            main.accessible_from_main = true;
        }

        Ok(Self { rooms })
    }

    /// Number of rooms.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if the map has no rooms.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms, main room first (descending size order).
    #[inline]
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The room behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[inline]
    #[must_use]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    /// The main room, if any room survived pruning.
    #[inline]
    #[must_use]
    pub fn main_room(&self) -> Option<RoomId> {
        if self.rooms.is_empty() {
            None
        } else {
            Some(RoomId(0))
        }
    }

    /// Connects every room to the main room via closest edge-tile pairs.
    ///
    /// First the unforced pass: each still-unconnected room (in size
    /// order) links to its globally closest other room. Rooms that already
    /// picked up a connection by the time they are visited are skipped.
    /// Then the forced pass repeatedly links the single closest
    /// (inaccessible, accessible) pair until everything reaches the main
    /// room.
    ///
    /// Zero or one rooms are trivially connected.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnreachableRoom`] if some room can never reach
    /// the main room (no edge tiles or no feasible pair).
    pub fn connect_closest_rooms(&mut self) -> MapResult<()> {
        if self.rooms.len() <= 1 {
            return Ok(());
        }
        self.unforced_pass();
        self.force_accessibility()
    }

    /// One connection attempt per not-yet-connected room.
    fn unforced_pass(&mut self) {
        for a in 0..self.rooms.len() {
            let a = RoomId(a);
            // Skip-if-already-connected policy: a room that acquired a
            // connection earlier in this pass initiates nothing.
            if !self.rooms[a.0].connections.is_empty() {
                continue;
            }

            let mut best: Option<(i64, RoomId)> = None;
            for b in 0..self.rooms.len() {
                let b = RoomId(b);
                if b == a || self.rooms[a.0].is_connected_to(b) {
                    continue;
                }
                if let Some(distance) = closest_pair_distance(&self.rooms[a.0], &self.rooms[b.0]) {
                    if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                        best = Some((distance, b));
                    }
                }
            }

            if let Some((_, b)) = best {
                self.connect(a, b);
            }
        }
    }

    /// Repeatedly connects the closest (inaccessible, accessible) pair.
    fn force_accessibility(&mut self) -> MapResult<()> {
        loop {
            let mut inaccessible = 0_usize;
            let mut best: Option<(i64, RoomId, RoomId)> = None;

            for a in 0..self.rooms.len() {
                let a = RoomId(a);
                if self.rooms[a.0].accessible_from_main {
                    continue;
                }
                inaccessible += 1;
                for b in 0..self.rooms.len() {
                    let b = RoomId(b);
                    if !self.rooms[b.0].accessible_from_main {
                        continue;
                    }
                    if let Some(distance) =
                        closest_pair_distance(&self.rooms[a.0], &self.rooms[b.0])
                    {
                        if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
                            best = Some((distance, a, b));
                        }
                    }
                }
            }

            if inaccessible == 0 {
                return Ok(());
            }
            match best {
                Some((_, a, b)) => self.connect(a, b),
                None => return Err(MapError::UnreachableRoom { inaccessible }),
            }
        }
    }

    /// Adds the mutual connection and floods accessibility if either side
    /// already reaches the main room.
    fn connect(&mut self, a: RoomId, b: RoomId) {
        self.rooms[a.0].connections.push(b);
        self.rooms[b.0].connections.push(a);

        if self.rooms[a.0].accessible_from_main || self.rooms[b.0].accessible_from_main {
            self.flood_accessibility(a);
        }
    }

    /// Iterative worklist propagation of the accessibility flag across the
    /// connected component of `start`.
    fn flood_accessibility(&mut self, start: RoomId) {
        let mut queue = VecDeque::from([start]);
        self.rooms[start.0].accessible_from_main = true;

        while let Some(room) = queue.pop_front() {
            for index in 0..self.rooms[room.0].connections.len() {
                let next = self.rooms[room.0].connections[index];
                if !self.rooms[next.0].accessible_from_main {
                    self.rooms[next.0].accessible_from_main = true;
                    queue.push_back(next);
                }
            }
        }
    }

    /// Shifts every room tile by `(dx, dy)`.
    ///
    /// The pipeline builds rooms in pre-pad coordinates and shifts them
    /// once the Wall border is added, so published room tiles always
    /// address the published grid.
    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        for room in &mut self.rooms {
            for tile in room.tiles.iter_mut().chain(room.edge_tiles.iter_mut()) {
                tile.x += dx;
                tile.y += dy;
            }
        }
    }

    /// Breadth-first check that every room is reachable from the main
    /// room through the connection relation.
    #[must_use]
    pub fn is_fully_connected(&self) -> bool {
        let Some(main) = self.main_room() else {
            return true;
        };

        let mut reached = vec![false; self.rooms.len()];
        let mut queue = VecDeque::from([main]);
        reached[main.0] = true;
        let mut count = 1;

        while let Some(room) = queue.pop_front() {
            for next in &self.rooms[room.0].connections {
                if !reached[next.0] {
                    reached[next.0] = true;
                    count += 1;
                    queue.push_back(*next);
                }
            }
        }

        count == self.rooms.len()
    }
}

/// Smallest squared distance over all edge-tile pairs of two rooms.
///
/// `None` when either room has no edge tiles.
fn closest_pair_distance(a: &Room, b: &Room) -> Option<i64> {
    let mut best: Option<i64> = None;
    for tile_a in &a.edge_tiles {
        for tile_b in &b.edge_tiles {
            let distance = tile_a.distance_squared(*tile_b);
            if best.map_or(true, |current| distance < current) {
                best = Some(distance);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::regions;

    /// Wall-filled grid with rectangular rooms carved out.
    fn carved_grid(width: i32, height: i32, rooms: &[(i32, i32, i32, i32)]) -> Grid {
        let mut grid = Grid::filled(width, height, Cell::Wall);
        for &(x0, y0, w, h) in rooms {
            for y in y0..y0 + h {
                for x in x0..x0 + w {
                    grid.set(x, y, Cell::Open);
                }
            }
        }
        grid
    }

    fn graph_for(grid: &Grid) -> RoomGraph {
        RoomGraph::build(grid, regions(grid, Cell::Open)).unwrap()
    }

    #[test]
    fn test_main_room_is_largest() {
        let grid = carved_grid(40, 20, &[(2, 2, 8, 8), (14, 2, 10, 10), (28, 2, 6, 6)]);
        let graph = graph_for(&grid);

        assert_eq!(graph.len(), 3);
        let main = graph.room(graph.main_room().unwrap());
        assert!(main.is_main());
        assert!(main.is_accessible_from_main());
        assert_eq!(main.size(), 100);
        assert!(graph.rooms()[1].size() >= graph.rooms()[2].size());
    }

    #[test]
    fn test_edge_tiles_are_wall_adjacent() {
        let grid = carved_grid(12, 12, &[(2, 2, 8, 8)]);
        let graph = graph_for(&grid);
        let room = graph.room(graph.main_room().unwrap());

        // An 8x8 block has a 28-tile perimeter.
        assert_eq!(room.size(), 64);
        assert_eq!(room.edge_tiles.len(), 28);
        for tile in &room.edge_tiles {
            let touches_wall = ORTHOGONAL_OFFSETS.iter().any(|(dx, dy)| {
                grid.in_bounds(tile.x + dx, tile.y + dy)
                    && grid.get(tile.x + dx, tile.y + dy) == Cell::Wall
            });
            assert!(touches_wall);
        }
    }

    #[test]
    fn test_connect_reaches_every_room() {
        let grid = carved_grid(
            60,
            30,
            &[(2, 2, 10, 10), (20, 2, 8, 8), (36, 2, 8, 8), (20, 16, 9, 9)],
        );
        let mut graph = graph_for(&grid);
        graph.connect_closest_rooms().unwrap();

        assert!(graph.is_fully_connected());
        for room in graph.rooms() {
            assert!(room.is_accessible_from_main());
            assert!(!room.connections().is_empty());
        }
    }

    #[test]
    fn test_skip_already_connected_room_changes_edge_set() {
        // A is the tall main room on the left. B sits close to A's right
        // edge, C sits further out. Visit order is A, C, B (stable sort
        // keeps discovery order for the equal-sized C and B).
        //
        // A connects to B (closest). C connects to A (closer than B from
        // C's edge tiles). B is then visited with a connection already in
        // hand and must initiate nothing - without the skip policy it
        // would add a B-C link.
        let a = (2, 2, 8, 28);
        let b = (16, 22, 8, 8);
        let c = (20, 2, 8, 8);
        let grid = carved_grid(40, 34, &[a, b, c]);
        let mut graph = graph_for(&grid);

        assert_eq!(graph.rooms()[0].size(), 8 * 28);
        graph.connect_closest_rooms().unwrap();

        let main = graph.main_room().unwrap();
        let (room_a, room_c, room_b) = (main, RoomId(1), RoomId(2));
        assert_eq!(graph.room(room_a).connections().len(), 2);
        assert_eq!(graph.room(room_b).connections(), &[room_a]);
        assert_eq!(graph.room(room_c).connections(), &[room_a]);
        assert!(
            !graph.room(room_b).is_connected_to(room_c),
            "skipped room must not initiate its own connection"
        );
        assert!(graph.is_fully_connected());
    }

    #[test]
    fn test_unreachable_room_is_fatal() {
        // Two "rooms" split by hand from a fully open grid: neither has
        // any edge tile, so no connecting pair exists anywhere.
        let grid = carved_grid(10, 10, &[(0, 0, 10, 10)]);
        let all = regions(&grid, Cell::Open);
        assert_eq!(all.len(), 1);
        let tiles = all.into_iter().next().unwrap().tiles;
        let (left, right): (Vec<_>, Vec<_>) = tiles.into_iter().partition(|t| t.x < 5);

        let mut graph = RoomGraph::build(
            &grid,
            vec![Region { tiles: left }, Region { tiles: right }],
        )
        .unwrap();

        assert_eq!(
            graph.connect_closest_rooms(),
            Err(MapError::UnreachableRoom { inaccessible: 1 })
        );
    }

    #[test]
    fn test_degenerate_region_is_fatal() {
        let grid = carved_grid(10, 10, &[]);
        let result = RoomGraph::build(&grid, vec![Region { tiles: Vec::new() }]);
        assert_eq!(result.unwrap_err(), MapError::DegenerateRegion);
    }

    #[test]
    fn test_zero_and_single_room_are_trivially_connected() {
        let grid = carved_grid(10, 10, &[]);
        let mut empty = RoomGraph::build(&grid, Vec::new()).unwrap();
        assert!(empty.main_room().is_none());
        empty.connect_closest_rooms().unwrap();
        assert!(empty.is_fully_connected());

        let grid = carved_grid(20, 20, &[(2, 2, 10, 10)]);
        let mut single = graph_for(&grid);
        single.connect_closest_rooms().unwrap();
        assert!(single.is_fully_connected());
        assert!(single.room(single.main_room().unwrap()).connections().is_empty());
    }
}
