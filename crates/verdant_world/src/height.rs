//! # Height Field
//!
//! The terrain surface is a pure function of `(x, seed)`: two phase-shifted
//! sine waves, the second shifted by the seed, averaged and scaled to the
//! viewport.
//!
//! Two corrections keep the result playable:
//!
//! 1. **Depth budget** - the surface never sits so high that the fixed-depth
//!    ground stack below it stops short of the viewport's bottom edge.
//! 2. **Headroom stretch** - a surface at or above the vertical midline is
//!    pushed down by a fixed factor.
//!
//! Because nothing here is random, a column removed and later re-created
//! lands at exactly the same height.

use std::f64::consts::PI;

use verdant_shared::Vec2;

use crate::seed::WorldSeed;

/// Terrain surface for one seed and viewport.
///
/// Heights are world `y` values of the surface (screen-like axis: larger is
/// lower on screen).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightField {
    /// Seed shifting the second sine wave.
    seed: WorldSeed,
    /// Viewport height in world pixels.
    viewport_height: f64,
    /// Ground block edge length.
    block_size: f64,
    /// Rows in every ground column.
    depth_rows: u32,
}

impl HeightField {
    /// Amplitude applied to the averaged waves.
    pub const SIN_FACTOR: f64 = 0.5;
    /// Fraction of the viewport above which the surface counts as too high.
    pub const HEIGHT_LIMIT_FACTOR: f64 = 0.5;
    /// Stretch applied to a surface that is too high.
    pub const STRETCH_FACTOR: f64 = 1.4;

    /// Creates a height field.
    #[must_use]
    pub fn new(seed: WorldSeed, viewport_height: f32, block_size: f32, depth_rows: u32) -> Self {
        Self {
            seed,
            viewport_height: f64::from(viewport_height),
            block_size: f64::from(block_size),
            depth_rows,
        }
    }

    /// The seed this field was built from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Depth of a full ground column in world pixels.
    #[inline]
    #[must_use]
    pub fn depth_budget(&self) -> f64 {
        f64::from(self.depth_rows) * self.block_size
    }

    /// Normalized wave in `[0, SIN_FACTOR]`.
    #[inline]
    fn wave(&self, x: f64) -> f64 {
        let shift = self.seed.value() as f64;
        let first = (x / PI).sin().abs();
        let second = ((2.0 * x - shift) / PI).sin().abs();
        Self::SIN_FACTOR * (first + second) / 2.0
    }

    /// Surface height at horizontal position `x`.
    ///
    /// Pure: identical inputs always give identical output, and it can be
    /// queried before anything has been generated at `x`.
    #[must_use]
    pub fn height_at(&self, x: f64) -> f64 {
        let raw = self.wave(x) * self.viewport_height;
        let gap = (self.viewport_height - self.depth_budget() - raw).max(0.0);
        let surface = raw + gap;

        if surface <= self.viewport_height * Self::HEIGHT_LIMIT_FACTOR {
            surface * Self::STRETCH_FACTOR
        } else {
            surface
        }
    }

    /// Top-left corner at which a body `body_height` tall rests on the
    /// surface at `x`.
    #[must_use]
    pub fn spawn_point(&self, x: f32, body_height: f32) -> Vec2 {
        let surface = self.height_at(f64::from(x)) as f32;
        Vec2::new(x, surface - body_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: u64) -> HeightField {
        HeightField::new(WorldSeed::new(seed), 700.0, 30.0, 20)
    }

    #[test]
    fn test_determinism() {
        let a = field(12345);
        let b = field(12345);

        for i in -500..500 {
            let x = f64::from(i) * 7.3;
            assert_eq!(a.height_at(x), b.height_at(x), "Height should be deterministic at {x}");
            assert_eq!(a.height_at(x), a.height_at(x));
        }
    }

    #[test]
    fn test_origin_with_zero_seed() {
        // Both waves vanish at x = 0: the depth gap (700 - 600) is all that is
        // left, and it sits above the midline so it gets stretched.
        let h = field(0).height_at(0.0);
        assert!((h - 140.0).abs() < 1e-9, "got {h}");
    }

    #[test]
    fn test_ground_always_reaches_viewport_bottom() {
        let f = field(0);
        for i in 0..5000 {
            let x = f64::from(i) * 3.0 - 7500.0;
            let h = f.height_at(x);
            assert!(h + f.depth_budget() >= 700.0, "column at {x} stops short: surface {h}");
        }
    }

    #[test]
    fn test_surface_stays_on_screen() {
        let f = field(99);
        for i in 0..5000 {
            let x = f64::from(i) * 11.0 - 25_000.0;
            let h = f.height_at(x);
            assert!((0.0..=700.0).contains(&h), "surface {h} off screen at {x}");
        }
    }

    #[test]
    fn test_different_seeds_different_surfaces() {
        let a = field(1);
        let b = field(2);
        let differs = (0..100).any(|i| {
            let x = f64::from(i) * 13.0;
            a.height_at(x) != b.height_at(x)
        });
        assert!(differs, "Different seeds should shift the terrain");
    }

    #[test]
    fn test_spawn_point_rests_on_surface() {
        let f = field(0);
        let p = f.spawn_point(500.0, 60.0);
        assert_eq!(p.x, 500.0);
        assert!((p.y + 60.0 - f.height_at(500.0) as f32).abs() < 1e-3);
    }
}
