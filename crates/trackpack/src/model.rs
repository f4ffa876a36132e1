//! Feature records, subtypes, and buckets.
//!
//! Records are arena-style: a bucket owns one `Vec<FeatureRecord>` and every
//! cross-reference (layer membership, cluster membership, parent links) is an
//! integer index or id, never a pointer.

use crate::range::Span;
use serde::{Deserialize, Serialize};

/// Opaque feature id, unique within one layout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub u64);

/// Closed set of annotation subtypes the engine understands.
///
/// Only `Gene`, `Mrna`, and `Cds` participate in hierarchy clustering; every
/// other subtype is packed individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    Gene,
    Mrna,
    Cds,
    Sts,
    Snp,
    Other(u32),
}

impl Subtype {
    /// Human-readable track label, read-only and process-wide.
    pub fn label(&self) -> &'static str {
        match self {
            Subtype::Gene => "Genes",
            Subtype::Mrna => "mRNAs",
            Subtype::Cds => "CDSs",
            Subtype::Sts => "STS markers",
            Subtype::Snp => "SNPs",
            Subtype::Other(_) => "Other features",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

/// One annotation as delivered by the feature-acquisition collaborator.
///
/// `mapped_range` is `None` when the annotation could not be mapped into
/// display coordinates; such features are dropped silently during
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeature {
    pub id: FeatureId,
    pub subtype: Subtype,
    pub strand: Strand,
    pub parent: Option<FeatureId>,
    pub mapped_range: Option<(u64, u64)>,
}

/// An immutable, mapped feature owned by its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: FeatureId,
    pub span: Span,
    pub subtype: Subtype,
    pub strand: Strand,
    pub parent: Option<FeatureId>,
}

/// One group of features processed together by a single layout/histogram
/// pass. Record order follows the input iteration order, which keeps the
/// stable sorts downstream reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub display_order: i32,
    pub records: Vec<FeatureRecord>,
}

impl Bucket {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bounding hull of every record span, or `None` for an empty bucket.
    pub fn feat_range(&self) -> Option<Span> {
        let mut iter = self.records.iter();
        let first = iter.next()?.span;
        Some(iter.fold(first, |acc, rec| acc.union(&rec.span)))
    }
}
