//! # Streaming Coordinator
//!
//! Keeps a band of world `[left, right)` materialized around a moving
//! viewpoint. Each tick it compares the viewpoint with the previous one and
//! slides the band by the same distance:
//!
//! ```text
//!   moved right by d:   create [right, right + d)   remove [left, left + d)
//!   moved left by d:    create [left - d, left)     remove [right - d, right)
//! ```
//!
//! Every generator runs create then remove, in registration order. The band
//! width never changes, so the number of live columns stays bounded no matter
//! how far the viewpoint travels.
//!
//! ## States
//!
//! `Uninitialized` records the first viewpoint without touching anything;
//! `Tracking` slides the band on every later tick.

use std::collections::BTreeSet;

use tracing::debug;
use verdant_shared::Vec2;

use crate::chunk::ChunkCoord;
use crate::generator::{RangeGenerator, RangeReport};
use crate::sink::Sink;

/// Horizontal extent of the materialized world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Left frontier, inclusive.
    pub left: f64,
    /// Right frontier, exclusive.
    pub right: f64,
}

impl Band {
    /// Creates a band.
    #[must_use]
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Band of `viewport_width * extent_factor` on either side of
    /// `viewpoint_x`.
    #[must_use]
    pub fn around(viewpoint_x: f64, viewport_width: f64, extent_factor: f64) -> Self {
        let half = viewport_width * extent_factor;
        Self { left: viewpoint_x - half, right: viewpoint_x + half }
    }

    /// Width in world pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns true if `x` lies inside the band.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.left <= x && x < self.right
    }
}

/// Which way the band slid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward positive x.
    Right,
    /// Toward negative x.
    Left,
}

/// Coordinator lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackingState {
    /// No viewpoint seen yet.
    Uninitialized,
    /// Following the viewpoint.
    Tracking {
        /// Viewpoint x from the last tick.
        previous_x: f64,
    },
}

/// What one tick changed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Direction and distance moved, if any.
    pub motion: Option<(Direction, f64)>,
    /// Content created across all generators.
    pub created: RangeReport,
    /// Content removed across all generators.
    pub removed: RangeReport,
}

/// Running totals since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamingStats {
    /// Calls to `update`.
    pub ticks: u64,
    /// Ticks on which the band slid.
    pub slides: u64,
    /// Columns created, all generators.
    pub columns_created: u64,
    /// Elements created, all generators.
    pub elements_created: u64,
    /// Columns removed, all generators.
    pub columns_removed: u64,
    /// Elements removed, all generators.
    pub elements_removed: u64,
}

impl StreamingStats {
    fn record_created(&mut self, report: RangeReport) {
        self.columns_created += report.columns as u64;
        self.elements_created += report.elements as u64;
    }

    fn record_removed(&mut self, report: RangeReport) {
        self.columns_removed += report.columns as u64;
        self.elements_removed += report.elements as u64;
    }

    /// Elements created and not yet removed.
    #[must_use]
    pub const fn elements_live(&self) -> u64 {
        self.elements_created.saturating_sub(self.elements_removed)
    }
}

/// Drives every generator from viewpoint motion.
pub struct StreamingCoordinator {
    generators: Vec<Box<dyn RangeGenerator>>,
    band: Band,
    state: TrackingState,
    stats: StreamingStats,
}

impl std::fmt::Debug for StreamingCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.generators.iter().map(|g| g.name()).collect();
        f.debug_struct("StreamingCoordinator")
            .field("generators", &names)
            .field("band", &self.band)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

impl StreamingCoordinator {
    /// Creates a coordinator with no generators and the given frontiers.
    #[must_use]
    pub fn new(band: Band) -> Self {
        Self {
            generators: Vec::new(),
            band,
            state: TrackingState::Uninitialized,
            stats: StreamingStats::default(),
        }
    }

    /// Frontiers seeded around a starting viewpoint.
    #[must_use]
    pub fn initial_band(viewpoint_x: f64, viewport_width: f64, extent_factor: f64) -> Band {
        Band::around(viewpoint_x, viewport_width, extent_factor)
    }

    /// Appends a generator. Generators run in the order they were added.
    pub fn push_generator(&mut self, generator: Box<dyn RangeGenerator>) {
        self.generators.push(generator);
    }

    /// Builder form of [`Self::push_generator`].
    #[must_use]
    pub fn with_generator(mut self, generator: Box<dyn RangeGenerator>) -> Self {
        self.push_generator(generator);
        self
    }

    /// Registered generators in run order.
    #[must_use]
    pub fn generators(&self) -> &[Box<dyn RangeGenerator>] {
        &self.generators
    }

    /// Current frontiers.
    #[must_use]
    pub const fn band(&self) -> Band {
        self.band
    }

    /// Left frontier.
    #[must_use]
    pub const fn left_frontier(&self) -> f64 {
        self.band.left
    }

    /// Right frontier.
    #[must_use]
    pub const fn right_frontier(&self) -> f64 {
        self.band.right
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TrackingState {
        self.state
    }

    /// Viewpoint x from the last tick, once tracking.
    #[must_use]
    pub const fn previous_viewpoint(&self) -> Option<f64> {
        match self.state {
            TrackingState::Uninitialized => None,
            TrackingState::Tracking { previous_x } => Some(previous_x),
        }
    }

    /// Running totals.
    #[must_use]
    pub const fn stats(&self) -> &StreamingStats {
        &self.stats
    }

    /// Union of every generator's live columns.
    #[must_use]
    pub fn live_columns(&self) -> BTreeSet<ChunkCoord> {
        self.generators.iter().flat_map(|g| g.live_columns()).collect()
    }

    /// Elements currently owned, all generators.
    #[must_use]
    pub fn live_elements(&self) -> usize {
        self.generators.iter().map(|g| g.live_elements()).sum()
    }

    /// Creates the whole band on every generator.
    ///
    /// Already-live columns are skipped, so calling this twice is harmless.
    pub fn materialize(&mut self, sink: &mut dyn Sink) -> RangeReport {
        let Band { left, right } = self.band;
        let mut total = RangeReport::default();
        for generator in &mut self.generators {
            let report = generator.create_in_range(left, right, sink);
            debug!(
                generator = generator.name(),
                columns = report.columns,
                elements = report.elements,
                "band materialized"
            );
            total += report;
        }
        self.stats.record_created(total);
        total
    }

    /// Advances one tick with the current viewpoint.
    pub fn update(&mut self, viewpoint: Vec2, sink: &mut dyn Sink) -> TickReport {
        self.stats.ticks += 1;
        let x = f64::from(viewpoint.x);
        if !x.is_finite() {
            debug!(x, "non-finite viewpoint ignored");
            return TickReport::default();
        }

        let previous = match self.state {
            TrackingState::Uninitialized => {
                self.state = TrackingState::Tracking { previous_x: x };
                debug!(x, left = self.band.left, right = self.band.right, "tracking started");
                return TickReport::default();
            }
            TrackingState::Tracking { previous_x } => previous_x,
        };
        self.state = TrackingState::Tracking { previous_x: x };

        let distance = (x - previous).abs();
        let report = if x > previous {
            self.slide(Direction::Right, distance, sink)
        } else if x < previous {
            self.slide(Direction::Left, distance, sink)
        } else {
            TickReport::default()
        };
        if report.motion.is_some() {
            self.stats.slides += 1;
            self.stats.record_created(report.created);
            self.stats.record_removed(report.removed);
        }
        report
    }

    fn slide(&mut self, direction: Direction, distance: f64, sink: &mut dyn Sink) -> TickReport {
        let Band { left, right } = self.band;
        let (create, remove, next) = match direction {
            Direction::Right => {
                let next = Band::new(left + distance, right + distance);
                ((right, next.right), (left, next.left), next)
            }
            Direction::Left => {
                let next = Band::new(left - distance, right - distance);
                ((next.left, left), (next.right, right), next)
            }
        };

        let mut report = TickReport { motion: Some((direction, distance)), ..TickReport::default() };
        for generator in &mut self.generators {
            report.created += generator.create_in_range(create.0, create.1, sink);
            report.removed += generator.remove_in_range(remove.0, remove.1, sink);
        }
        self.band = next;

        debug!(
            ?direction,
            distance,
            left = next.left,
            right = next.right,
            created = report.created.elements,
            removed = report.removed.elements,
            "band slid"
        );
        report
    }

    /// Removes the whole band from every generator and forgets the viewpoint.
    ///
    /// The frontiers stay where they are; [`Self::materialize`] rebuilds the
    /// same band.
    pub fn reset(&mut self, sink: &mut dyn Sink) -> RangeReport {
        let Band { left, right } = self.band;
        let mut total = RangeReport::default();
        for generator in &mut self.generators {
            total += generator.remove_in_range(left, right, sink);
        }
        self.stats.record_removed(total);
        self.state = TrackingState::Uninitialized;
        debug!(columns = total.columns, elements = total.elements, "band torn down");
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<(&'static str, &'static str, f64, f64)>>>;

    /// Records calls and creates nothing.
    struct Recorder {
        name: &'static str,
        log: CallLog,
    }

    impl RangeGenerator for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn create_in_range(&mut self, min_x: f64, max_x: f64, _sink: &mut dyn Sink) -> RangeReport {
            self.log.borrow_mut().push((self.name, "create", min_x, max_x));
            RangeReport::default()
        }

        fn remove_in_range(&mut self, min_x: f64, max_x: f64, _sink: &mut dyn Sink) -> RangeReport {
            self.log.borrow_mut().push((self.name, "remove", min_x, max_x));
            RangeReport::default()
        }

        fn live_columns(&self) -> Vec<ChunkCoord> {
            Vec::new()
        }

        fn live_elements(&self) -> usize {
            0
        }
    }

    fn recording(names: &[&'static str]) -> (StreamingCoordinator, CallLog) {
        let log = CallLog::default();
        let mut coordinator = StreamingCoordinator::new(Band::new(-2800.0, 2800.0));
        for &name in names {
            coordinator.push_generator(Box::new(Recorder { name, log: Rc::clone(&log) }));
        }
        (coordinator, log)
    }

    #[test]
    fn test_initial_band_matches_stock_window() {
        let band = StreamingCoordinator::initial_band(0.0, 1400.0, 2.0);
        assert_eq!(band, Band::new(-2800.0, 2800.0));
        assert!((band.width() - 5600.0).abs() < f64::EPSILON);
        assert!(band.contains(-2800.0));
        assert!(!band.contains(2800.0));
    }

    #[test]
    fn test_first_tick_only_records() {
        let (mut coordinator, log) = recording(&["a"]);
        let mut sink = crate::sink::LayerCollection::new();

        let report = coordinator.update(Vec2::new(0.0, 0.0), &mut sink);
        assert_eq!(report, TickReport::default());
        assert!(log.borrow().is_empty());
        assert_eq!(coordinator.previous_viewpoint(), Some(0.0));
    }

    #[test]
    fn test_right_move_calls() {
        let (mut coordinator, log) = recording(&["a", "b"]);
        let mut sink = crate::sink::LayerCollection::new();

        coordinator.update(Vec2::new(0.0, 0.0), &mut sink);
        let report = coordinator.update(Vec2::new(100.0, 0.0), &mut sink);

        assert_eq!(report.motion, Some((Direction::Right, 100.0)));
        assert_eq!(
            *log.borrow(),
            vec![
                ("a", "create", 2800.0, 2900.0),
                ("a", "remove", -2800.0, -2700.0),
                ("b", "create", 2800.0, 2900.0),
                ("b", "remove", -2800.0, -2700.0),
            ]
        );
        assert_eq!(coordinator.band(), Band::new(-2700.0, 2900.0));
    }

    #[test]
    fn test_left_move_calls() {
        let (mut coordinator, log) = recording(&["a"]);
        let mut sink = crate::sink::LayerCollection::new();

        coordinator.update(Vec2::new(50.0, 0.0), &mut sink);
        coordinator.update(Vec2::new(20.0, 0.0), &mut sink);

        assert_eq!(
            *log.borrow(),
            vec![("a", "create", -2830.0, -2800.0), ("a", "remove", 2770.0, 2800.0)]
        );
        assert_eq!(coordinator.left_frontier(), -2830.0);
        assert_eq!(coordinator.right_frontier(), 2770.0);
    }

    #[test]
    fn test_standing_still_is_noop() {
        let (mut coordinator, log) = recording(&["a"]);
        let mut sink = crate::sink::LayerCollection::new();

        coordinator.update(Vec2::new(10.0, 0.0), &mut sink);
        coordinator.update(Vec2::new(10.0, 99.0), &mut sink);
        assert!(log.borrow().is_empty());
        assert_eq!(coordinator.stats().ticks, 2);
        assert_eq!(coordinator.stats().slides, 0);
    }

    #[test]
    fn test_non_finite_viewpoint_is_ignored() {
        let (mut coordinator, log) = recording(&["a"]);
        let mut sink = crate::sink::LayerCollection::new();

        coordinator.update(Vec2::new(0.0, 0.0), &mut sink);
        coordinator.update(Vec2::new(f32::NAN, 0.0), &mut sink);
        assert!(log.borrow().is_empty());
        assert_eq!(coordinator.previous_viewpoint(), Some(0.0));
    }

    #[test]
    fn test_reset_returns_to_uninitialized() {
        let (mut coordinator, log) = recording(&["a"]);
        let mut sink = crate::sink::LayerCollection::new();

        coordinator.update(Vec2::new(0.0, 0.0), &mut sink);
        coordinator.reset(&mut sink);

        assert_eq!(coordinator.state(), TrackingState::Uninitialized);
        assert_eq!(*log.borrow(), vec![("a", "remove", -2800.0, 2800.0)]);
    }
}
