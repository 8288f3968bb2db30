use crate::error::{KMeansError, Result};
use crate::initialization::InitPolicy;

/// Runtime configuration for a clustering run.
///
/// All randomness in a run derives from `seed`, so two runs with the same
/// configuration over the same vectors produce identical results. Vectors,
/// centers and costs are `f64` throughout.
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of vectors to cluster.
    pub n_vectors: usize,
    /// Dimension of every vector.
    pub n_dims: usize,
    /// Number of clusters.
    pub n_clusters: usize,
    /// Minimum relative cost improvement required to keep iterating.
    pub threshold: f64,
    /// Iteration cap for one convergence loop.
    pub max_iters: usize,
    /// Seed for all random choices (data generation, initialization).
    pub seed: u64,
    /// Center seeding policy.
    pub init: InitPolicy,
    /// Number of restarts; the run with the lowest final cost wins.
    pub restarts: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            n_vectors: 1000,
            n_dims: 16,
            n_clusters: 8,
            threshold: 1e-6,
            max_iters: 16,
            seed: 0,
            init: InitPolicy::RandomDistinct,
            restarts: 1,
        }
    }
}

impl KMeansConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_vectors == 0 || self.n_dims == 0 {
            return Err(KMeansError::Configuration(
                "vector count and dimension must both be non-zero".into(),
            ));
        }
        if self.n_clusters == 0 {
            return Err(KMeansError::Configuration(
                "cluster count must be non-zero".into(),
            ));
        }
        if self.n_clusters > self.n_vectors {
            return Err(KMeansError::Configuration(format!(
                "cannot choose {} distinct centers from {} vectors",
                self.n_clusters, self.n_vectors
            )));
        }
        if self.restarts == 0 {
            return Err(KMeansError::Configuration(
                "restart count must be non-zero".into(),
            ));
        }
        self.validate_loop_controls()
    }

    /// Checks only threshold and iteration cap, for entry points that take
    /// their sizes from the store and caller-supplied centers instead of
    /// the configured dimensions.
    pub fn validate_loop_controls(&self) -> Result<()> {
        if self.max_iters == 0 {
            return Err(KMeansError::Configuration(
                "iteration cap must be non-zero".into(),
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(KMeansError::Configuration(format!(
                "convergence threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(KMeansConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_more_clusters_than_vectors() {
        let config = KMeansConfig {
            n_vectors: 5,
            n_clusters: 6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KMeansError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_zero_sizes_and_bad_threshold() {
        for config in [
            KMeansConfig {
                n_vectors: 0,
                ..Default::default()
            },
            KMeansConfig {
                n_dims: 0,
                ..Default::default()
            },
            KMeansConfig {
                n_clusters: 0,
                ..Default::default()
            },
            KMeansConfig {
                max_iters: 0,
                ..Default::default()
            },
            KMeansConfig {
                threshold: f64::NAN,
                ..Default::default()
            },
            KMeansConfig {
                threshold: -1.0,
                ..Default::default()
            },
            KMeansConfig {
                restarts: 0,
                ..Default::default()
            },
        ] {
            assert!(config.validate().is_err());
        }
    }
}
