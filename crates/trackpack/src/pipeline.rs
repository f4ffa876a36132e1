//! Per-bucket pipeline: density decision, cancellation, worker scheduling.
//!
//! The layout computation itself is synchronous and executor-free; this
//! module adds the thin worker-thread wrapper around it. Each bucket runs as
//! an independent unit of work with its own result channel, so a superseded
//! request is discarded by dropping the receiver rather than by bookkeeping.

use crate::classify::{LayoutOptions, classify};
use crate::error::Result;
use crate::graph::{Graph, GraphContent, PlacedFeature};
use crate::histogram::Aggregator;
use crate::layout::{Placement, linked_layout, simple_layout};
use crate::model::{Bucket, RawFeature};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Buckets with more features than this fall back to the coverage histogram.
/// A hard cutoff, not a heuristic: exactly `HIST_THRESHOLD` features still
/// lay out per feature.
pub const HIST_THRESHOLD: usize = 1000;

/// Cooperative cancellation flag shared between a caller and its in-flight
/// bucket computations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs one bucket through the density decision and the selected layout or
/// histogram pass.
///
/// Returns `None` for an empty bucket or a cancelled computation — in both
/// cases there is no graph, and cancellation is all-or-nothing per bucket.
pub fn run_bucket(
    bucket: &Bucket,
    options: &LayoutOptions,
    cancel: &CancelToken,
) -> Option<Result<Graph>> {
    if cancel.is_cancelled() || bucket.is_empty() {
        return None;
    }

    if bucket.len() > HIST_THRESHOLD {
        tracing::debug!(
            bucket = %bucket.label,
            count = bucket.len(),
            "dense bucket, aggregating coverage histogram"
        );
        return Some(histogram_graph(bucket, options));
    }

    tracing::debug!(
        bucket = %bucket.label,
        count = bucket.len(),
        linked = options.link_genes,
        "laying out bucket"
    );
    let placement = if options.link_genes {
        linked_layout(&bucket.records, cancel)?
    } else {
        simple_layout(&bucket.records)
    };
    Some(Ok(layered_graph(bucket, placement)))
}

/// Spawns one worker thread for `bucket` and hands back its result channel.
///
/// A cancelled or empty bucket sends nothing; the receiver observes a
/// disconnect, which callers treat as "try again later", not as failure.
pub fn spawn_bucket(
    bucket: Bucket,
    options: LayoutOptions,
    cancel: CancelToken,
) -> Receiver<Result<Graph>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        if let Some(result) = run_bucket(&bucket, &options, &cancel) {
            // The receiver may already be gone if the request was superseded.
            let _ = tx.send(result);
        }
    });
    rx
}

/// Classifies `features`, packs every bucket on its own worker, and collects
/// the finished graphs sorted by `display_order`.
///
/// Buckets complete in unspecified relative order; the sort restores the
/// caller-facing stacking order.
pub fn layout_features(features: &[RawFeature], options: &LayoutOptions) -> Result<Vec<Graph>> {
    let buckets = classify(features, options)?;
    let cancel = CancelToken::new();
    let receivers: Vec<Receiver<Result<Graph>>> = buckets
        .into_iter()
        .map(|bucket| spawn_bucket(bucket, *options, cancel.clone()))
        .collect();

    let mut graphs = Vec::new();
    for rx in receivers {
        if let Ok(result) = rx.recv() {
            graphs.push(result?);
        }
    }
    graphs.sort_by_key(|graph| graph.display_order);
    Ok(graphs)
}

fn histogram_graph(bucket: &Bucket, options: &LayoutOptions) -> Result<Graph> {
    let mut aggregator = Aggregator::new(bucket)?;
    let feat_range = aggregator.feat_range();
    let (start, stop) = options.viewport.unwrap_or((feat_range.from, feat_range.to));
    let histogram = aggregator.anchor(start, stop)?.clone();
    Ok(Graph {
        label: bucket.label.clone(),
        display_order: bucket.display_order,
        content: GraphContent::Histogram(histogram),
    })
}

fn layered_graph(bucket: &Bucket, placement: Placement) -> Graph {
    let layers: Vec<Vec<PlacedFeature>> = placement
        .layers
        .iter()
        .enumerate()
        .map(|(layer, members)| {
            members
                .iter()
                .map(|&idx| PlacedFeature {
                    feature_id: bucket.records[idx].id,
                    layer,
                    cluster: placement.cluster_of[idx],
                })
                .collect()
        })
        .collect();
    Graph {
        label: bucket.label.clone(),
        display_order: bucket.display_order,
        content: GraphContent::Layered {
            layers,
            clusters: placement.clusters,
        },
    }
}
