//! Greedy longest-first placement without hierarchy links.

use super::Placement;
use crate::model::FeatureRecord;

/// Packs every record onto the first layer with room for it.
///
/// Records are processed longest-first; the sort is stable, so equal-length
/// records keep their bucket order. This tie-break (rather than sorting by
/// start position) is what makes repeated runs byte-identical.
pub fn simple_layout(records: &[FeatureRecord]) -> Placement {
    let mut placement = Placement::new(records.len());
    for idx in longest_first(records, 0..records.len()) {
        placement.place_single(idx, records[idx].span);
    }
    placement
}

/// Stable descending-length ordering of `indices`.
pub(crate) fn longest_first(
    records: &[FeatureRecord],
    indices: impl IntoIterator<Item = usize>,
) -> Vec<usize> {
    let mut order: Vec<usize> = indices.into_iter().collect();
    order.sort_by(|&a, &b| records[b].span.len().cmp(&records[a].span.len()));
    order
}
