use thiserror::Error;

/// Errors surfaced by clustering runs.
///
/// Empty clusters are normally self-healed by center substitution and never
/// reach the caller; `DegenerateCluster` is returned only when no substitute
/// vector exists (every vector already serves as a center).
#[derive(Debug, Error)]
pub enum KMeansError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("center {center} has no members and no unused vector is left to substitute it")]
    DegenerateCluster { center: usize },

    #[error("dimension mismatch: expected {expected} columns, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, KMeansError>;
