//! Output contract shared by the layered and histogram paths.
//!
//! A `Graph` is everything the rendering side needs from one bucket; the
//! engine knows nothing about pixels, and a consumer stacks multiple graphs
//! vertically by `display_order`.

use crate::histogram::Histogram;
use crate::model::FeatureId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedFeature {
    pub feature_id: FeatureId,
    pub layer: usize,
    pub cluster: Option<usize>,
}

/// A contiguous block of layers reserved for one hierarchy cluster, plus the
/// horizontal padding enforced around its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub first_layer: usize,
    pub last_layer: usize,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphContent {
    Layered {
        layers: Vec<Vec<PlacedFeature>>,
        clusters: Vec<ClusterInfo>,
    },
    Histogram(Histogram),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub label: String,
    pub display_order: i32,
    pub content: GraphContent,
}
