//! # Column Registry
//!
//! Per-generator bookkeeping: which element handles live in which column.
//!
//! ## Invariant
//!
//! A column is present if and only if it currently has content in the sink.
//! Entries are never created empty, and releasing a column hands every one
//! of its handles back to the sink exactly once before the entry is erased.

use std::collections::BTreeMap;

use tracing::trace;
use verdant_shared::Layer;

use crate::chunk::{ChunkCoord, ColumnSpan};
use crate::generator::RangeReport;
use crate::sink::{ElementId, Sink};

/// One handle owned by a registry, with the layer it was inserted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placed {
    /// Handle returned by the sink.
    pub id: ElementId,
    /// Layer the element was inserted into.
    pub layer: Layer,
}

/// Mapping from column to the handles placed there.
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    columns: BTreeMap<ChunkCoord, Vec<Placed>>,
    handles: usize,
}

impl ColumnRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `coord` has live content.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.columns.contains_key(&coord)
    }

    /// Handles registered at `coord`.
    #[must_use]
    pub fn get(&self, coord: ChunkCoord) -> Option<&[Placed]> {
        self.columns.get(&coord).map(Vec::as_slice)
    }

    /// Number of live columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of live handles across all columns.
    #[must_use]
    pub const fn handle_count(&self) -> usize {
        self.handles
    }

    /// Live columns, left to right.
    pub fn columns(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.columns.keys().copied()
    }

    /// Records the content placed at `coord`.
    ///
    /// Empty placements are not recorded. If the column is already live the
    /// new placement is refused and handed back so the caller can release it.
    pub fn register(&mut self, coord: ChunkCoord, placed: Vec<Placed>) -> Result<(), Vec<Placed>> {
        if placed.is_empty() {
            return Ok(());
        }
        if self.columns.contains_key(&coord) {
            return Err(placed);
        }
        self.handles += placed.len();
        self.columns.insert(coord, placed);
        Ok(())
    }

    /// Releases every live column inside `span` to the sink.
    ///
    /// Columns are collected first and erased afterwards; columns without an
    /// entry are skipped.
    pub fn release_span(&mut self, span: ColumnSpan, sink: &mut dyn Sink) -> RangeReport {
        if span.is_empty() {
            return RangeReport::default();
        }
        let doomed: Vec<ChunkCoord> = self.columns.range(span.as_range()).map(|(&c, _)| c).collect();
        self.release_columns(&doomed, sink)
    }

    /// Releases every live column.
    pub fn release_all(&mut self, sink: &mut dyn Sink) -> RangeReport {
        let doomed: Vec<ChunkCoord> = self.columns.keys().copied().collect();
        self.release_columns(&doomed, sink)
    }

    fn release_columns(&mut self, doomed: &[ChunkCoord], sink: &mut dyn Sink) -> RangeReport {
        let mut report = RangeReport::default();
        for coord in doomed {
            let Some(placed) = self.columns.remove(coord) else {
                continue;
            };
            for p in &placed {
                sink.remove(p.id, p.layer);
            }
            trace!(column = coord.index(), handles = placed.len(), "column released");
            self.handles -= placed.len();
            report.columns += 1;
            report.elements += placed.len();
        }
        report
    }
}
