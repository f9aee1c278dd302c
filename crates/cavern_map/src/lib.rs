//! # CAVERN Map Generation
//!
//! Deterministic cave-layout synthesis: seeded random fill, cellular
//! automaton smoothing, region analysis, and a room graph with a hard
//! connectivity guarantee.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same seed and parameters always produce the
//!    same grid, byte for byte
//! 2. **Synchronous**: one generation runs to completion; there is no
//!    internal parallelism and no incremental path
//! 3. **All or nothing**: a failed attempt returns an error, never a
//!    partial or disconnected map
//!
//! ## Pipeline
//!
//! [`synthesize`] -> [`smooth_pass`] x [`SMOOTHING_PASSES`] ->
//! [`prune_small_regions`] -> [`RoomGraph::build`] ->
//! [`RoomGraph::connect_closest_rooms`] -> border pad, in that order; see
//! [`generate_map`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use cavern_map::{generate_map, MapConfig, MapSeed};
//!
//! let config = MapConfig::new(72, 48, 46, MapSeed::from_text("deep"));
//! let map = generate_map(&config)?;
//! assert!(map.rooms.is_fully_connected());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod automaton;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod regions;
pub mod rooms;
pub mod seed;
pub mod synthesis;

pub use automaton::{smooth_pass, SMOOTHING_PASSES};
pub use error::{MapError, MapResult};
pub use grid::{Cell, Coord, Grid, ORTHOGONAL_OFFSETS};
pub use pipeline::{generate_map, MapData, BORDER_PAD};
pub use regions::{prune_small_regions, regions, Region, REGION_THRESHOLD};
pub use rooms::{Room, RoomGraph, RoomId};
pub use seed::MapSeed;
pub use synthesis::{synthesize, MapConfig};
