//! # Range Generators
//!
//! A [`RangeGenerator`] owns every element of one kind in the materialized
//! band. The coordinator only ever talks to it in horizontal ranges; the
//! generator snaps them to the shared [`ChunkGrid`] and works column by
//! column.
//!
//! ## Protocol
//!
//! - `create_in_range` places content in every column of the snapped range
//!   that is not already live. Overlapping calls never duplicate anything.
//! - `remove_in_range` hands every handle of every live column in the
//!   snapped range back to the sink, then forgets the column.
//! - Empty or inverted ranges are no-ops.
//!
//! The three kinds share one implementation, [`ColumnGenerator`], and differ
//! only in their [`ColumnPlacer`].

use tracing::trace;

use crate::chunk::{ChunkCoord, ChunkGrid};
use crate::registry::{ColumnRegistry, Placed};
use crate::sink::Sink;

/// What a single range operation touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeReport {
    /// Columns created or released.
    pub columns: usize,
    /// Element handles inserted or removed.
    pub elements: usize,
}

impl RangeReport {
    /// Returns true if nothing was touched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 && self.elements == 0
    }
}

impl std::ops::AddAssign for RangeReport {
    fn add_assign(&mut self, rhs: Self) {
        self.columns += rhs.columns;
        self.elements += rhs.elements;
    }
}

/// Creates and destroys world content by horizontal range.
pub trait RangeGenerator {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Creates content for every not-yet-live column in `[min_x, max_x)`.
    fn create_in_range(&mut self, min_x: f64, max_x: f64, sink: &mut dyn Sink) -> RangeReport;

    /// Removes content of every live column in `[min_x, max_x)`.
    fn remove_in_range(&mut self, min_x: f64, max_x: f64, sink: &mut dyn Sink) -> RangeReport;

    /// Live columns, left to right.
    fn live_columns(&self) -> Vec<ChunkCoord>;

    /// Number of handles currently owned.
    fn live_elements(&self) -> usize;
}

/// Kind-specific placement for a single column.
pub trait ColumnPlacer {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Inserts the content of column `coord` (left edge at `world_x`).
    ///
    /// Returns every handle inserted. An empty result means the column has
    /// no content of this kind.
    fn place(&self, coord: ChunkCoord, world_x: f64, sink: &mut dyn Sink) -> Vec<Placed>;
}

/// Range generator built from a column placer and a registry.
#[derive(Debug)]
pub struct ColumnGenerator<P> {
    grid: ChunkGrid,
    placer: P,
    registry: ColumnRegistry,
}

impl<P: ColumnPlacer> ColumnGenerator<P> {
    /// Creates a generator with an empty registry.
    #[must_use]
    pub fn new(grid: ChunkGrid, placer: P) -> Self {
        Self { grid, placer, registry: ColumnRegistry::new() }
    }

    /// The placer.
    #[must_use]
    pub const fn placer(&self) -> &P {
        &self.placer
    }

    /// The per-column bookkeeping.
    #[must_use]
    pub const fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }
}

impl<P: ColumnPlacer> RangeGenerator for ColumnGenerator<P> {
    fn name(&self) -> &'static str {
        P::NAME
    }

    fn create_in_range(&mut self, min_x: f64, max_x: f64, sink: &mut dyn Sink) -> RangeReport {
        let mut report = RangeReport::default();
        for coord in self.grid.span(min_x, max_x).iter() {
            if self.registry.contains(coord) {
                continue;
            }
            let placed = self.placer.place(coord, self.grid.world_x(coord), sink);
            let count = placed.len();
            if count == 0 {
                continue;
            }
            if let Err(refused) = self.registry.register(coord, placed) {
                // Unreachable while the contains check above holds
                for p in refused {
                    sink.remove(p.id, p.layer);
                }
                continue;
            }
            trace!(generator = P::NAME, column = coord.index(), handles = count, "column placed");
            report.columns += 1;
            report.elements += count;
        }
        report
    }

    fn remove_in_range(&mut self, min_x: f64, max_x: f64, sink: &mut dyn Sink) -> RangeReport {
        self.registry.release_span(self.grid.span(min_x, max_x), sink)
    }

    fn live_columns(&self) -> Vec<ChunkCoord> {
        self.registry.columns().collect()
    }

    fn live_elements(&self) -> usize {
        self.registry.handle_count()
    }
}
