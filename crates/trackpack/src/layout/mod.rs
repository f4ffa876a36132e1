//! Track layout: greedy per-feature packing and gene/mRNA/CDS clustering.
//!
//! Both paths share one `Placement`: an ordered stack of layers with a
//! per-layer occupancy set. All placement is first-fit scanning layers from
//! zero upward, which together with the stable longest-first sorts makes the
//! output deterministic.

mod simple;
pub use simple::simple_layout;

mod linked;
pub use linked::{MIN_OFFSET, linked_layout};

use crate::graph::ClusterInfo;
use crate::range::{Occupancy, Span};

/// Abutment margin: features on one layer keep at least this gap between
/// their raw spans.
pub const ABUT_MARGIN: u64 = 1;

/// Mutable placement state threaded through the layout passes.
///
/// `layers[i]` holds indices into the owning bucket's record array;
/// `cluster_of[idx]` is the back-reference from a record to the cluster that
/// consumed it. The occupancy vector only lives for the duration of the
/// layout pass.
#[derive(Debug, Clone)]
pub struct Placement {
    pub layers: Vec<Vec<usize>>,
    pub clusters: Vec<ClusterInfo>,
    pub cluster_of: Vec<Option<usize>>,
    occupancy: Vec<Occupancy>,
}

impl Placement {
    pub fn new(record_count: usize) -> Self {
        Self {
            layers: Vec::new(),
            clusters: Vec::new(),
            cluster_of: vec![None; record_count],
            occupancy: Vec::new(),
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// True if `span` fits on `layer`; layers past the current stack count as
    /// empty.
    pub(crate) fn layer_is_free(&self, layer: usize, span: &Span) -> bool {
        self.occupancy.get(layer).is_none_or(|occ| occ.is_free(span))
    }

    /// First-fit placement of a single record: the record lands on the first
    /// layer where its span, padded by the abutment margin, is free. The
    /// occupancy reserves the raw span.
    pub(crate) fn place_single(&mut self, idx: usize, span: Span) -> usize {
        let probe = span.pad(ABUT_MARGIN);
        let found = (0..self.layers.len()).find(|&layer| self.occupancy[layer].is_free(&probe));
        let layer = match found {
            Some(layer) => layer,
            None => {
                self.push_layer();
                self.layers.len() - 1
            }
        };
        self.layers[layer].push(idx);
        self.occupancy[layer].reserve(span);
        layer
    }

    /// Reserves a contiguous block of layers for one cluster, one member per
    /// layer, recording the padded spans in the occupancy so later placements
    /// respect the cluster's buffer zone.
    pub(crate) fn reserve_cluster(
        &mut self,
        members: &[usize],
        padded: &[Span],
        first_layer: usize,
        offset: u64,
    ) -> usize {
        debug_assert_eq!(members.len(), padded.len());
        while self.layers.len() < first_layer + members.len() {
            self.push_layer();
        }
        let cluster = self.clusters.len();
        for (i, (&idx, span)) in members.iter().zip(padded.iter()).enumerate() {
            let layer = first_layer + i;
            debug_assert!(
                self.occupancy[layer].is_free(span),
                "cluster member does not fit the layer it was scanned into"
            );
            self.layers[layer].push(idx);
            self.occupancy[layer].reserve(*span);
            self.cluster_of[idx] = Some(cluster);
        }
        self.clusters.push(ClusterInfo {
            first_layer,
            last_layer: first_layer + members.len() - 1,
            offset,
        });
        cluster
    }

    fn push_layer(&mut self) {
        self.layers.push(Vec::new());
        self.occupancy.push(Occupancy::new());
    }
}
