#![forbid(unsafe_code)]

//! Headless feature track packing for genomic viewers.
//!
//! `trackpack` decides which horizontal track ("layer") each mapped
//! annotation interval occupies: greedy non-overlapping packing for flat
//! feature sets, contiguous gene → mRNA → CDS cluster blocks when hierarchy
//! links are honored, and a fixed-bin coverage histogram when a bucket is too
//! dense to lay out per feature.
//!
//! The engine is a pure, repeatable function of (interval set, hierarchy
//! links, viewport parameters): stable sorts plus first-fit placement make
//! two runs over the same input byte-identical. It knows nothing about
//! pixels; callers map layers and histogram bins onto their own rendering
//! surface and stack per-bucket graphs by `display_order`.

pub mod classify;
pub mod error;
pub mod graph;
pub mod histogram;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod range;

pub use classify::{LayoutOptions, classify};
pub use error::{Error, Result};
pub use graph::{ClusterInfo, Graph, GraphContent, PlacedFeature};
pub use histogram::{Aggregator, BIN_COUNT, Histogram};
pub use layout::{ABUT_MARGIN, MIN_OFFSET, Placement, linked_layout, simple_layout};
pub use model::{Bucket, FeatureId, FeatureRecord, RawFeature, Strand, Subtype};
pub use pipeline::{CancelToken, HIST_THRESHOLD, layout_features, run_bucket, spawn_bucket};

/// Headless layout entry point.
pub fn layout(features: &[RawFeature], options: &LayoutOptions) -> Result<Vec<Graph>> {
    pipeline::layout_features(features, options)
}
