//! # Scripted Walks
//!
//! A [`WalkScript`] is a list of legs, each a signed distance covered in
//! fixed steps. [`run_walk`] plays it against a world, one tick per step,
//! and audits the sink as it goes.

use tracing::{debug, info, warn};
use verdant_shared::Vec2;
use verdant_world::{Band, LayerCollection, StreamingStats, World};

/// Ticks between progress logs.
pub const PROGRESS_INTERVAL: u64 = 1_000;

/// One straight stretch of a walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkLeg {
    /// Signed distance; negative walks left.
    pub distance: f32,
    /// Step length per tick, always positive.
    pub step: f32,
}

impl WalkLeg {
    /// Creates a leg. A non-positive step is replaced by one pixel.
    #[must_use]
    pub fn new(distance: f32, step: f32) -> Self {
        let step = if step > 0.0 { step } else { 1.0 };
        Self { distance, step }
    }

    /// Number of ticks this leg takes.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn ticks(&self) -> u64 {
        (self.distance.abs() / self.step).ceil() as u64
    }
}

/// Sequence of legs walked from the spawn point.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkScript {
    legs: Vec<WalkLeg>,
}

impl WalkScript {
    /// Creates a script from legs.
    #[must_use]
    pub fn new(legs: Vec<WalkLeg>) -> Self {
        Self { legs }
    }

    /// Right by `distance`, back left past the start by the same, then home.
    #[must_use]
    pub fn out_and_back(distance: f32, step: f32) -> Self {
        Self::new(vec![
            WalkLeg::new(distance, step),
            WalkLeg::new(-2.0 * distance, step),
            WalkLeg::new(distance, step),
        ])
    }

    /// The legs.
    #[must_use]
    pub fn legs(&self) -> &[WalkLeg] {
        &self.legs
    }

    /// Total ticks across all legs.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.legs.iter().map(WalkLeg::ticks).sum()
    }
}

impl Default for WalkScript {
    fn default() -> Self {
        Self::out_and_back(20_000.0, 5.0)
    }
}

/// What a walk left behind.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkSummary {
    /// Ticks played, including the first one that starts tracking.
    pub ticks: u64,
    /// Viewpoint x at the end.
    pub final_x: f32,
    /// Band at the end.
    pub band: Band,
    /// Coordinator totals.
    pub stats: StreamingStats,
    /// Elements the generators own.
    pub owned: usize,
    /// Elements live in the sink.
    pub live: usize,
    /// Largest live count seen.
    pub peak_live: usize,
    /// Removals the sink could not match.
    pub stray_removals: usize,
}

impl WalkSummary {
    /// Returns true if the sink and the registries agree and nothing strayed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.owned == self.live && self.stray_removals == 0
    }
}

/// Materializes the band, then plays `script` from the spawn point.
pub fn run_walk(world: &mut World, sink: &mut LayerCollection, script: &WalkScript) -> WalkSummary {
    let materialized = world.materialize(sink);
    info!(
        columns = materialized.columns,
        elements = materialized.elements,
        "initial band ready"
    );

    let spawn = world.spawn_point();
    let mut x = spawn.x;
    world.tick(Vec2::new(x, spawn.y), sink);

    let mut ticks = 1u64;
    let mut peak_live = sink.len();

    for (index, leg) in script.legs().iter().enumerate() {
        debug!(leg = index, distance = leg.distance, step = leg.step, "leg started");
        let target = x + leg.distance;
        let direction = leg.distance.signum();

        for _ in 0..leg.ticks() {
            x = if direction > 0.0 {
                (x + leg.step).min(target)
            } else {
                (x - leg.step).max(target)
            };
            world.tick(Vec2::new(x, spawn.y), sink);
            ticks += 1;
            peak_live = peak_live.max(sink.len());

            if ticks % PROGRESS_INTERVAL == 0 {
                let band = world.band();
                info!(ticks, x, left = band.left, right = band.right, live = sink.len(), "walking");
            }
        }
    }

    let summary = WalkSummary {
        ticks,
        final_x: x,
        band: world.band(),
        stats: *world.coordinator().stats(),
        owned: world.coordinator().live_elements(),
        live: sink.len(),
        peak_live,
        stray_removals: sink.stray_removals().len(),
    };

    if summary.is_clean() {
        info!(ticks, live = summary.live, peak = summary.peak_live, "walk finished clean");
    } else {
        warn!(
            owned = summary.owned,
            live = summary.live,
            strays = summary.stray_removals,
            "sink and registries disagree"
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_world::WorldConfig;

    #[test]
    fn test_leg_ticks() {
        assert_eq!(WalkLeg::new(100.0, 5.0).ticks(), 20);
        assert_eq!(WalkLeg::new(-101.0, 5.0).ticks(), 21);
        assert_eq!(WalkLeg::new(10.0, 0.0).step, 1.0);
        assert_eq!(WalkScript::out_and_back(100.0, 10.0).total_ticks(), 40);
    }

    #[test]
    fn test_out_and_back_returns_home() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        let mut sink = LayerCollection::new();
        let start_band = world.band();

        let summary = run_walk(&mut world, &mut sink, &WalkScript::out_and_back(3_000.0, 7.0));

        assert!(summary.is_clean(), "{summary:?}");
        assert!((summary.final_x - 500.0).abs() < 1e-2, "ended at {}", summary.final_x);
        assert!((summary.band.left - start_band.left).abs() < 1e-2);
        assert!((summary.band.right - start_band.right).abs() < 1e-2);
        assert_eq!(summary.ticks, 1 + WalkScript::out_and_back(3_000.0, 7.0).total_ticks());
    }

    #[test]
    fn test_live_count_stays_bounded() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        let mut sink = LayerCollection::new();

        let summary = run_walk(&mut world, &mut sink, &WalkScript::new(vec![WalkLeg::new(30_000.0, 25.0)]));

        // Ground alone is 20 blocks per column over ~187 columns
        let ground = 20 * 188;
        assert!(summary.peak_live < ground * 3, "peak {} grew with distance", summary.peak_live);
        assert!(summary.is_clean());
    }
}
