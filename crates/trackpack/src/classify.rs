//! Grouping of mapped features into display buckets.

use crate::error::{Error, Result};
use crate::model::{Bucket, FeatureRecord, RawFeature, Subtype};
use crate::range::Span;
use indexmap::IndexMap;

/// Caller-facing layout parameters.
///
/// `separate_types` and `link_genes` are mutually exclusive: type-separated
/// buckets never contain a gene together with its mRNAs, so there is nothing
/// to link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    pub separate_types: bool,
    pub link_genes: bool,
    pub track_order: i32,
    /// Viewport sub-range used to anchor the histogram fallback. When absent,
    /// a dense bucket is anchored to its own feature range.
    pub viewport: Option<(u64, u64)>,
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        if self.separate_types && self.link_genes {
            return Err(Error::ConflictingModes);
        }
        Ok(())
    }
}

/// Groups `features` into buckets: one per distinct subtype in first-seen
/// order when `separate_types` is set, otherwise a single bucket.
///
/// Features without a mapped location are dropped silently; record order
/// within each bucket follows the input iteration order.
pub fn classify(features: &[RawFeature], options: &LayoutOptions) -> Result<Vec<Bucket>> {
    options.validate()?;

    let mut dropped = 0usize;
    let mut groups: IndexMap<Option<Subtype>, Vec<FeatureRecord>> = IndexMap::new();
    for feature in features {
        let Some(record) = mapped_record(feature) else {
            dropped += 1;
            continue;
        };
        let key = options.separate_types.then_some(record.subtype);
        groups.entry(key).or_default().push(record);
    }
    if dropped > 0 {
        tracing::debug!(dropped, "skipped features without a mapped location");
    }

    let buckets = groups
        .into_iter()
        .enumerate()
        .map(|(position, (key, records))| Bucket {
            label: match key {
                Some(subtype) => subtype.label().to_string(),
                None => "Features".to_string(),
            },
            display_order: options.track_order + position as i32,
            records,
        })
        .collect();
    Ok(buckets)
}

fn mapped_record(feature: &RawFeature) -> Option<FeatureRecord> {
    let (from, to) = feature.mapped_range?;
    // A degenerate mapped location counts as unmapped.
    if from == to {
        return None;
    }
    Some(FeatureRecord {
        id: feature.id,
        span: Span::new(from.min(to), from.max(to)),
        subtype: feature.subtype,
        strand: feature.strand,
        parent: feature.parent,
    })
}
