//! # World Seed
//!
//! Every random decision in the world derives from one `WorldSeed`.
//!
//! ## Determinism Guarantee
//!
//! Placement randomness is keyed by `(seed, purpose, column)`, never by a
//! shared sequential generator. A column that is removed and later
//! re-created draws exactly the same numbers, no matter which columns were
//! visited in between or in what order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Stream purpose for tree placement and foliage.
    pub const VEGETATION: u64 = 0x7EE5;
    /// Stream purpose for creature placement.
    pub const CREATURES: u64 = 0xF0C5;

    /// Creates a new world seed.
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

    /// Derives a sub-seed for a specific purpose (e.g., vegetation).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a style mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Returns the random stream for one column of one purpose.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn column_rng(self, purpose: u64, column: i32) -> ChaCha8Rng {
        // Sign-extend so negative columns map to distinct streams
        let key = self.derive(purpose).derive(i64::from(column) as u64);
        ChaCha8Rng::seed_from_u64(key.value())
    }
}
