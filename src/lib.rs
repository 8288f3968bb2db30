//! Batched (Lloyd's) K-means clustering over fixed-dimension real vectors.
//!
//! The assignment pass and the center-update accumulation both fan out
//! across rayon workers; every random choice derives from the configured
//! seed, so runs are reproducible. Vectors, centers and costs are `f64`
//! throughout, and the convergence cost is the sum of per-vector minimum
//! Euclidean distances.

pub mod algorithm;
pub mod assignment;
pub mod config;
pub mod distance;
pub mod error;
pub mod initialization;
pub mod logger;
pub mod store;
pub mod update;

pub use algorithm::{run, run_restarts, run_with_centers, KMeansOutput};
pub use config::KMeansConfig;
pub use error::{KMeansError, Result};
pub use initialization::InitPolicy;
pub use store::VectorStore;
