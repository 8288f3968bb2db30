use itertools::Itertools;

use kmeans_parallel_lloyd::logger::init_logger;
use kmeans_parallel_lloyd::{run_restarts, InitPolicy, KMeansConfig, VectorStore};

fn main() {
    init_logger().expect("Failed to initialize logger");

    let config = KMeansConfig {
        n_vectors: 10_000,
        n_dims: 64,
        n_clusters: 16,
        threshold: 1e-6,
        max_iters: 16,
        seed: 42,
        init: InitPolicy::RandomDistinct,
        restarts: 1,
    };
    log::info!(
        "clustering {} random vectors of {} dimensions into {} classes",
        config.n_vectors,
        config.n_dims,
        config.n_clusters
    );

    let store = VectorStore::random(config.n_vectors, config.n_dims, config.seed)
        .expect("error generating vectors");
    let output = run_restarts(&store, &config).expect("error during kmeans");

    log::info!(
        "finished after {} repetitions with final cost {:.6}",
        output.iterations,
        output.cost
    );
    let sizes = output
        .labels
        .iter()
        .counts()
        .into_iter()
        .sorted()
        .map(|(_, count)| count)
        .collect_vec();
    log::info!("members per class: {:?}", sizes);
}
