//! # Map Seed
//!
//! Deterministic seeding for the generation pipeline.
//!
//! ## Determinism Guarantee
//!
//! Given the same `MapSeed` and parameters, the pipeline produces
//! **exactly** the same grid on any platform, any time. Text seeds hash
//! through FNV-1a, so the mapping from text to stream is part of that
//! contract (unlike runtime-specific string hashes).

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Seed for deterministic map generation.
///
/// All randomness in the pipeline derives from this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapSeed(u64);

impl MapSeed {
    /// Creates a new map seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Hashes a text seed into a `MapSeed`.
    ///
    /// FNV-1a over the UTF-8 bytes. Stable across platforms and releases.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in text.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        Self(hash)
    }

    /// Draws a fresh seed from OS entropy.
    ///
    /// Used by the random-seed mode; reproducibility is intentionally
    /// broken for maps generated this way.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(OsRng.next_u64())
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Creates independent streams from one seed via FNV-style mixing.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for MapSeed {
    fn default() -> Self {
        Self(0xCAFE_D0D0_5EED_0001)
    }
}

impl From<u64> for MapSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for MapSeed {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
