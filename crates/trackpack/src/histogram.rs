//! Coverage-histogram fallback for buckets too dense to lay out per feature.

use crate::error::{Error, Result};
use crate::model::Bucket;
use crate::range::Span;
use serde::{Deserialize, Serialize};

/// Number of coverage bins, fixed regardless of feature count.
pub const BIN_COUNT: usize = 2048;

/// Binned per-base coverage over `[start, start + BIN_COUNT * step)`.
///
/// A feature contributes one unit to every bin its span touches; partial
/// overlap is not prorated. `max_value` is exposed for caller-side
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub start: u64,
    pub stop: u64,
    pub step: f64,
    pub bins: Vec<f64>,
    pub max_value: f64,
}

/// Accumulates a bucket's coverage histogram, re-binning only when the
/// requested anchor window changes.
#[derive(Debug, Clone)]
pub struct Aggregator<'a> {
    bucket: &'a Bucket,
    feat_range: Span,
    cached: Option<Histogram>,
}

impl<'a> Aggregator<'a> {
    pub fn new(bucket: &'a Bucket) -> Result<Self> {
        let feat_range = bucket.feat_range().ok_or(Error::EmptyBucket)?;
        Ok(Self {
            bucket,
            feat_range,
            cached: None,
        })
    }

    pub fn feat_range(&self) -> Span {
        self.feat_range
    }

    /// (Re)anchors the histogram to the viewport sub-range `[start, stop)`.
    ///
    /// An anchor with `start >= stop` or `start` outside `[0, feat_range.to)`
    /// is a caller contract violation and is rejected rather than clamped.
    /// Re-anchoring to the window already computed returns the cached result.
    pub fn anchor(&mut self, start: u64, stop: u64) -> Result<&Histogram> {
        if start >= stop || start >= self.feat_range.to {
            return Err(Error::HistogramAnchor {
                start,
                stop,
                limit: self.feat_range.to,
            });
        }
        let cached_hit = self
            .cached
            .as_ref()
            .is_some_and(|h| h.start == start && h.stop == stop);
        if !cached_hit {
            self.cached = Some(self.accumulate(start, stop));
        }
        Ok(self.cached.as_ref().expect("histogram computed above"))
    }

    fn accumulate(&self, start: u64, stop: u64) -> Histogram {
        let step = (self.feat_range.to - start) as f64 / BIN_COUNT as f64;
        let mut bins = vec![0.0f64; BIN_COUNT];
        for record in &self.bucket.records {
            if record.span.to <= start {
                continue;
            }
            let lo = (record.span.from.max(start) - start) as f64;
            let hi = (record.span.to - start) as f64;
            let first = ((lo / step).floor() as usize).min(BIN_COUNT - 1);
            // `hi` is exclusive: a span ending exactly on a bin boundary does
            // not touch the next bin.
            let last = (((hi / step).ceil() as usize).saturating_sub(1)).min(BIN_COUNT - 1);
            for bin in &mut bins[first..=last] {
                *bin += 1.0;
            }
        }
        let max_value = bins.iter().copied().fold(0.0f64, f64::max);
        Histogram {
            start,
            stop,
            step,
            bins,
            max_value,
        }
    }
}
