//! Gene → mRNA → CDS clustering with contiguous block placement.
//!
//! Clusters are gathered in three anchor phases (gene-anchored, then
//! mRNA-anchored, then orphan CDS) before the remaining subtypes are packed
//! individually. The phase order decides which feature anchors a cluster, so
//! it is part of the engine's observable behavior, not an implementation
//! detail.

use super::Placement;
use super::simple::longest_first;
use crate::model::{FeatureId, FeatureRecord, Subtype};
use crate::pipeline::CancelToken;
use crate::range::Span;
use rustc_hash::FxHashMap;

/// Smallest horizontal buffer reserved around a cluster, in display units.
pub const MIN_OFFSET: u64 = 500;

/// Cluster padding is `cluster_span / PAD_DIVISOR`, floored at `MIN_OFFSET`.
const PAD_DIVISOR: u64 = 25;

/// Lays out a mixed-subtype bucket with hierarchy links honored.
///
/// Returns `None` if the computation was cancelled; a cancelled bucket never
/// yields a partial placement.
pub fn linked_layout(records: &[FeatureRecord], cancel: &CancelToken) -> Option<Placement> {
    let mut placement = Placement::new(records.len());
    let mut placed = vec![false; records.len()];

    let mut children: FxHashMap<FeatureId, Vec<usize>> = FxHashMap::default();
    for (idx, record) in records.iter().enumerate() {
        if let Some(parent) = record.parent {
            children.entry(parent).or_default().push(idx);
        }
    }

    // Phase 1: gene-anchored clusters. A gene with no available children
    // still forms a single-member cluster so it gets the same buffer policy.
    for (gene_idx, record) in records.iter().enumerate() {
        if record.subtype != Subtype::Gene {
            continue;
        }
        let mut members = vec![gene_idx];

        let gene_children = children.get(&record.id).map_or(&[][..], Vec::as_slice);
        let mrnas: Vec<usize> = gene_children
            .iter()
            .copied()
            .filter(|&idx| records[idx].subtype == Subtype::Mrna && !placed[idx])
            .collect();
        for mrna_idx in longest_first(records, mrnas) {
            members.push(mrna_idx);
            placed[mrna_idx] = true;
            if let Some(cds_idx) = best_cds(records, &children, &placed, records[mrna_idx].id) {
                members.push(cds_idx);
                placed[cds_idx] = true;
            }
        }

        let direct_cds: Vec<usize> = gene_children
            .iter()
            .copied()
            .filter(|&idx| records[idx].subtype == Subtype::Cds && !placed[idx])
            .collect();
        for cds_idx in longest_first(records, direct_cds) {
            members.push(cds_idx);
            placed[cds_idx] = true;
        }

        place_cluster(records, &mut placement, &members);
        if cancel.is_cancelled() {
            return None;
        }
    }

    // Phase 2: mRNA-anchored clusters for mRNAs no gene consumed.
    for (mrna_idx, record) in records.iter().enumerate() {
        if record.subtype != Subtype::Mrna || placed[mrna_idx] {
            continue;
        }
        let mut members = vec![mrna_idx];
        placed[mrna_idx] = true;
        if let Some(cds_idx) = best_cds(records, &children, &placed, record.id) {
            members.push(cds_idx);
            placed[cds_idx] = true;
        }
        place_cluster(records, &mut placement, &members);
        if cancel.is_cancelled() {
            return None;
        }
    }

    // Phase 3: orphan CDS, placed alone against the shared occupancy.
    let orphans: Vec<usize> = (0..records.len())
        .filter(|&idx| records[idx].subtype == Subtype::Cds && !placed[idx])
        .collect();
    for idx in longest_first(records, orphans) {
        placement.place_single(idx, records[idx].span);
        placed[idx] = true;
    }

    // Phase 4: everything else shares the same occupancy vector, so
    // unrelated features still avoid cluster buffer zones.
    let rest: Vec<usize> = (0..records.len())
        .filter(|&idx| {
            !matches!(
                records[idx].subtype,
                Subtype::Gene | Subtype::Mrna | Subtype::Cds
            )
        })
        .collect();
    for idx in longest_first(records, rest) {
        placement.place_single(idx, records[idx].span);
    }

    Some(placement)
}

/// The single best-supported CDS association for `parent`: its longest
/// unplaced CDS child, first-seen on ties.
fn best_cds(
    records: &[FeatureRecord],
    children: &FxHashMap<FeatureId, Vec<usize>>,
    placed: &[bool],
    parent: FeatureId,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &idx in children.get(&parent)? {
        if records[idx].subtype != Subtype::Cds || placed[idx] {
            continue;
        }
        match best {
            Some(current) if records[idx].span.len() <= records[current].span.len() => {}
            _ => best = Some(idx),
        }
    }
    best
}

/// First-fit scan for a contiguous block of layers where every member's
/// padded span is free; extends the layer stack when nothing fits.
fn place_cluster(records: &[FeatureRecord], placement: &mut Placement, members: &[usize]) {
    let hull = members
        .iter()
        .map(|&idx| records[idx].span)
        .reduce(|acc, span| acc.union(&span))
        .expect("a cluster always has at least its anchor");
    let pad = (hull.len() / PAD_DIVISOR).max(MIN_OFFSET);
    let padded: Vec<Span> = members
        .iter()
        .map(|&idx| records[idx].span.pad(pad))
        .collect();

    let mut first_layer = placement.layer_count();
    'scan: for candidate in 0..placement.layer_count() {
        for (i, span) in padded.iter().enumerate() {
            if !placement.layer_is_free(candidate + i, span) {
                continue 'scan;
            }
        }
        first_layer = candidate;
        break;
    }

    let cluster = placement.reserve_cluster(members, &padded, first_layer, pad);
    tracing::trace!(
        cluster,
        first_layer,
        members = members.len(),
        pad,
        "placed cluster"
    );
}
