//! Half-open interval and per-layer occupancy primitives.
//!
//! Everything downstream (layering, clustering, histogram binning) is built on
//! these two types, so they stay deliberately small and copy-friendly.

use serde::{Deserialize, Serialize};

/// A half-open `[from, to)` interval in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub from: u64,
    pub to: u64,
}

impl Span {
    pub fn new(from: u64, to: u64) -> Self {
        debug_assert!(from <= to, "span bounds out of order: [{from}, {to})");
        Self { from, to }
    }

    pub fn len(&self) -> u64 {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn intersects(&self, other: &Span) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Bounding hull of two spans (not a set union).
    pub fn union(&self, other: &Span) -> Span {
        Span {
            from: self.from.min(other.from),
            to: self.to.max(other.to),
        }
    }

    /// Extends the span by `margin` on both sides, saturating at zero.
    pub fn pad(&self, margin: u64) -> Span {
        Span {
            from: self.from.saturating_sub(margin),
            to: self.to.saturating_add(margin),
        }
    }
}

/// The set of spans already reserved on one layer.
///
/// Spans are kept disjoint and sorted by `from`; reserving a span merges it
/// with any overlapping or abutting neighbors. The structure only exists while
/// a layout is being constructed and is discarded afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    spans: Vec<Span>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// True if `span` does not intersect any reserved span.
    pub fn is_free(&self, span: &Span) -> bool {
        if span.is_empty() {
            return true;
        }
        let idx = self.spans.partition_point(|s| s.to <= span.from);
        self.spans.get(idx).is_none_or(|s| s.from >= span.to)
    }

    /// Reserves `span`, merging overlapping and abutting neighbors.
    pub fn reserve(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }
        let lo = self.spans.partition_point(|s| s.to < span.from);
        let hi = self.spans.partition_point(|s| s.from <= span.to);
        if lo == hi {
            self.spans.insert(lo, span);
            return;
        }
        let merged = Span::new(
            self.spans[lo].from.min(span.from),
            self.spans[hi - 1].to.max(span.to),
        );
        self.spans.splice(lo..hi, std::iter::once(merged));
    }
}
