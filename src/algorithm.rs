use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assignment::assign;
use crate::config::KMeansConfig;
use crate::error::{KMeansError, Result};
use crate::initialization::seed_centers;
use crate::store::VectorStore;
use crate::update::update_centers;

/// Final state of a converged run.
#[derive(Debug, Clone)]
pub struct KMeansOutput {
    pub centers: Array2<f64>,
    pub labels: Vec<usize>,
    pub iterations: usize,
    pub cost: f64,
}

#[derive(PartialEq)]
enum LoopState {
    Running,
    Converged,
}

/// Alternates assignment and center update until the relative cost
/// improvement drops to the threshold or the iteration cap is hit.
///
/// The previous cost starts at infinity so the first iteration always
/// proceeds. A zero cost converges immediately: every vector sits on its
/// center and no update can improve it.
fn converge(
    store: &VectorStore,
    mut centers: Array2<f64>,
    threshold: f64,
    max_iters: usize,
) -> Result<KMeansOutput> {
    let mut prev_cost = f64::INFINITY;
    let mut labels = vec![0usize; store.len()];
    let mut cost = f64::INFINITY;
    let mut iterations = 0;
    let mut state = LoopState::Running;

    while state == LoopState::Running && iterations < max_iters {
        iterations += 1;

        let outcome = assign(store, centers.view());
        labels = outcome.labels;
        cost = outcome.cost;
        update_centers(store, &labels, &mut centers)?;

        let improvement = if cost > 0.0 {
            (prev_cost - cost) / cost
        } else {
            0.0
        };
        log::info!(
            "repetition {:3}  cost {:.6}  improvement {:.8}",
            iterations,
            cost,
            improvement
        );
        if improvement <= threshold {
            state = LoopState::Converged;
        }
        prev_cost = cost;
    }

    if state == LoopState::Converged {
        log::info!("converged after {} repetitions", iterations);
    } else {
        log::info!("iteration cap of {} repetitions reached", max_iters);
    }
    Ok(KMeansOutput {
        centers,
        labels,
        iterations,
        cost,
    })
}

/// Runs one clustering pass: validates the configuration, seeds centers
/// from the store and drives the convergence loop.
pub fn run(store: &VectorStore, config: &KMeansConfig) -> Result<KMeansOutput> {
    config.validate()?;
    run_seeded(store, config, config.seed)
}

fn run_seeded(store: &VectorStore, config: &KMeansConfig, seed: u64) -> Result<KMeansOutput> {
    if config.n_vectors != store.len() || config.n_dims != store.dim() {
        return Err(KMeansError::Configuration(format!(
            "configuration describes a {}x{} matrix but the store holds {}x{}",
            config.n_vectors,
            config.n_dims,
            store.len(),
            store.dim()
        )));
    }
    if config.n_clusters > store.len() {
        return Err(KMeansError::Configuration(format!(
            "cannot choose {} distinct centers from {} vectors",
            config.n_clusters,
            store.len()
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let centers = seed_centers(store, config.n_clusters, config.init, &mut rng)?;
    converge(store, centers, config.threshold, config.max_iters)
}

/// Runs the loop from caller-supplied initial centers, for resuming from a
/// known seeding or pinning the start state in tests.
pub fn run_with_centers(
    store: &VectorStore,
    centers: Array2<f64>,
    config: &KMeansConfig,
) -> Result<KMeansOutput> {
    config.validate_loop_controls()?;
    if centers.ncols() != store.dim() {
        return Err(KMeansError::DimensionMismatch {
            expected: store.dim(),
            got: centers.ncols(),
        });
    }
    if centers.nrows() == 0 || centers.nrows() > store.len() {
        return Err(KMeansError::Configuration(format!(
            "cannot run with {} centers over {} vectors",
            centers.nrows(),
            store.len()
        )));
    }
    converge(store, centers, config.threshold, config.max_iters)
}

/// Runs `config.restarts` independent seedings and keeps the cheapest result.
pub fn run_restarts(store: &VectorStore, config: &KMeansConfig) -> Result<KMeansOutput> {
    config.validate()?;
    let mut best: Option<KMeansOutput> = None;
    for restart in 0..config.restarts {
        let output = run_seeded(store, config, config.seed.wrapping_add(restart as u64))?;
        log::info!(
            "finished restart #{} with final cost {:.6}",
            restart,
            output.cost
        );
        let improved = best
            .as_ref()
            .map_or(true, |current| output.cost < current.cost);
        if improved {
            best = Some(output);
        }
    }
    best.ok_or_else(|| KMeansError::Configuration("restart count must be non-zero".into()))
}
