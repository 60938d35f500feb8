//! # Chunk Grid
//!
//! The world is cut into fixed-width vertical columns ("chunks").
//! Every range operation snaps its bounds to this grid, so all generators
//! agree on where a column starts and no column is ever created twice by
//! two overlapping, unaligned requests.
//!
//! ## Snapping
//!
//! A horizontal position is rounded *up* to the next multiple of the chunk
//! width. A half-open range `[min, max)` therefore covers the columns whose
//! left edge lies in `[ceil(min / w) * w, ceil(max / w) * w)`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Chunk coordinate (identifies one column in the world grid).
///
/// Stored as a column index, not in world pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkCoord(pub i32);

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    /// Returns the column index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> i32 {
        self.0
    }
}

/// Half-open run of columns produced by snapping a horizontal range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpan {
    start: i32,
    end: i32,
}

impl ColumnSpan {
    /// The span covering no column at all.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Returns true if the span covers no column.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Number of columns in the span.
    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.end) - i64::from(self.start)) as usize
        }
    }

    /// Returns true if `coord` lies in the span.
    #[inline]
    #[must_use]
    pub const fn contains(self, coord: ChunkCoord) -> bool {
        coord.0 >= self.start && coord.0 < self.end
    }

    /// Iterates the columns of the span, left to right.
    pub fn iter(self) -> impl Iterator<Item = ChunkCoord> {
        (self.start..self.end).map(ChunkCoord)
    }

    /// The span as a key range, for ordered registry lookups.
    #[must_use]
    pub const fn as_range(self) -> Range<ChunkCoord> {
        if self.is_empty() {
            ChunkCoord(0)..ChunkCoord(0)
        } else {
            ChunkCoord(self.start)..ChunkCoord(self.end)
        }
    }
}

/// The shared quantization contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkGrid {
    /// Column width in world pixels (always at least 1).
    width: u32,
}

impl ChunkGrid {
    /// Creates a grid with columns `width` pixels wide.
    ///
    /// A zero width is clamped to one pixel; configuration validation
    /// rejects it long before it gets here.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self { width: width.max(1) }
    }

    /// Column width in world pixels.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Rounds `x` up to the column whose left edge is the next grid line.
    #[inline]
    #[must_use]
    pub fn snap_up(self, x: f64) -> ChunkCoord {
        ChunkCoord((x / f64::from(self.width)).ceil() as i32)
    }

    /// World X of a column's left edge.
    #[inline]
    #[must_use]
    pub fn world_x(self, coord: ChunkCoord) -> f64 {
        f64::from(coord.0) * f64::from(self.width)
    }

    /// Snaps `[min_x, max_x)` to the grid.
    ///
    /// Inverted, empty or non-finite ranges yield [`ColumnSpan::EMPTY`].
    #[must_use]
    pub fn span(self, min_x: f64, max_x: f64) -> ColumnSpan {
        if !min_x.is_finite() || !max_x.is_finite() || min_x >= max_x {
            return ColumnSpan::EMPTY;
        }
        let start = self.snap_up(min_x).0;
        let end = self.snap_up(max_x).0;
        if start >= end {
            ColumnSpan::EMPTY
        } else {
            ColumnSpan { start, end }
        }
    }
}
