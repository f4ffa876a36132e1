pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("`separate_types` and `link_genes` are mutually exclusive")]
    ConflictingModes,

    #[error("histogram anchor [{start}, {stop}) lies outside the feature range (end = {limit})")]
    HistogramAnchor { start: u64, stop: u64, limit: u64 },

    #[error("histogram requested for an empty bucket")]
    EmptyBucket,
}
