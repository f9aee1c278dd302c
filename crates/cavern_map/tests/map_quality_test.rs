//! # Map Quality Tests
//!
//! Sweeps many seeds and fill percentages and checks the structural
//! guarantees every generated layout must carry.

use cavern_map::{generate_map, Cell, MapConfig, MapSeed, REGION_THRESHOLD};

fn generate(fill_percent: u32, seed: u64) -> cavern_map::MapData {
    generate_map(&MapConfig::new(72, 48, fill_percent, MapSeed::new(seed))).unwrap()
}

#[test]
fn test_all_rooms_reachable_across_seeds() {
    for seed in 0..25 {
        let map = generate(47, seed);
        assert!(
            map.rooms.is_fully_connected(),
            "seed {seed} produced an unreachable room"
        );
    }
}

#[test]
fn test_no_room_below_survival_threshold() {
    for seed in [3, 17, 1_000_003] {
        let map = generate(47, seed);
        for room in map.rooms.rooms() {
            assert!(
                room.size() >= REGION_THRESHOLD,
                "seed {seed} kept a {}-tile room",
                room.size()
            );
        }
    }
}

#[test]
fn test_border_is_sealed_across_fill_range() {
    for fill_percent in [30, 40, 47, 55, 65] {
        let map = generate(fill_percent, 9);
        let grid = &map.grid;
        for coord in grid.coords() {
            if grid.is_border(coord.x, coord.y) {
                assert_eq!(grid.get(coord.x, coord.y), Cell::Wall);
            }
        }
    }
}

#[test]
fn test_room_tiles_match_grid() {
    let map = generate(47, 123);
    let mut open_in_rooms = 0;
    for room in map.rooms.rooms() {
        for tile in &room.tiles {
            assert_eq!(map.grid.get(tile.x, tile.y), Cell::Open);
        }
        open_in_rooms += room.size();
    }
    // The connector records graph edges only and never carves passages,
    // so every open cell belongs to exactly one room.
    assert_eq!(map.grid.count(Cell::Open), open_in_rooms);
}

#[test]
fn test_zero_fill_partitions_into_ring_and_interior() {
    // Before smoothing, a zero-fill grid is exactly its Wall ring plus
    // one Open interior block.
    let grid = cavern_map::synthesize(
        &MapConfig::new(10, 10, 0, MapSeed::new(5)),
        MapSeed::new(5),
    )
    .unwrap();

    let open = cavern_map::regions(&grid, Cell::Open);
    let wall = cavern_map::regions(&grid, Cell::Wall);
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].len(), 64);
    assert_eq!(wall.len(), 1);
    assert_eq!(wall[0].len(), 36);
}

#[test]
fn test_edge_tiles_touch_wall() {
    let map = generate(47, 321);
    for room in map.rooms.rooms() {
        assert!(!room.edge_tiles.is_empty());
        for tile in &room.edge_tiles {
            let touches_wall = [(0, -1), (-1, 0), (1, 0), (0, 1)].iter().any(|(dx, dy)| {
                let (x, y) = (tile.x + dx, tile.y + dy);
                !map.grid.in_bounds(x, y) || map.grid.get(x, y) == Cell::Wall
            });
            assert!(touches_wall);
        }
    }
}
