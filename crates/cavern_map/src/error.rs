//! # Map Error Types
//!
//! All errors that can abort a generation attempt. Every error is fatal to
//! the current attempt: no partial map is ever returned.

use thiserror::Error;

/// Errors that can occur while generating a cave map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Grid dimensions must both be strictly positive.
    #[error("invalid dimensions: {width}x{height} (both must be > 0)")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Fill percentage outside the closed range [0, 100].
    #[error("invalid fill percent: {0} (must be in 0..=100)")]
    InvalidFillPercent(u32),

    /// A room could not be connected to the main room.
    ///
    /// Either no edge tiles exist anywhere or no feasible connecting pair
    /// remains. The map is disconnected and must not be used.
    #[error("{inaccessible} room(s) unreachable from the main room")]
    UnreachableRoom {
        /// Number of rooms left inaccessible.
        inaccessible: usize,
    },

    /// A room was built from an empty region.
    ///
    /// Internal consistency fault: the thresholder only emits non-empty
    /// regions.
    #[error("degenerate region: room candidate has no tiles")]
    DegenerateRegion,
}

/// Result type for map generation operations.
pub type MapResult<T> = Result<T, MapError>;
