use ndarray::array;

use kmeans_parallel_lloyd::{
    assignment::assign, run, run_with_centers, update::update_centers, InitPolicy, KMeansConfig,
    KMeansError, VectorStore,
};

fn config(store: &VectorStore, k: usize) -> KMeansConfig {
    KMeansConfig {
        n_vectors: store.len(),
        n_dims: store.dim(),
        n_clusters: k,
        threshold: 1e-6,
        max_iters: 16,
        seed: 7,
        init: InitPolicy::RandomDistinct,
        restarts: 1,
    }
}

#[test]
fn terminates_with_k_centers_and_valid_labels() {
    for (n, d, k) in [(30, 2, 1), (100, 8, 7), (64, 3, 64), (50, 16, 50)] {
        let store = VectorStore::random(n, d, 13).unwrap();
        let output = run(&store, &config(&store, k)).unwrap();
        assert_eq!(output.centers.nrows(), k);
        assert_eq!(output.centers.ncols(), d);
        assert_eq!(output.labels.len(), n);
        assert!(output.labels.iter().all(|&label| label < k));
        assert!(output.iterations <= 16);
        assert!(output.cost.is_finite());
    }
}

#[test]
fn every_init_policy_completes() {
    let store = VectorStore::random(120, 6, 5).unwrap();
    for init in [
        InitPolicy::RandomDistinct,
        InitPolicy::FirstUniqueByValue,
        InitPolicy::KMeansPlusPlus,
    ] {
        let cfg = KMeansConfig {
            init,
            ..config(&store, 6)
        };
        let output = run(&store, &cfg).unwrap();
        assert_eq!(output.centers.nrows(), 6);
    }
}

#[test]
fn runs_are_reproducible_per_seed() {
    let store = VectorStore::random(150, 5, 99).unwrap();
    let cfg = config(&store, 4);
    let a = run(&store, &cfg).unwrap();
    let b = run(&store, &cfg).unwrap();
    assert_eq!(a.labels, b.labels);
    assert_eq!(a.centers, b.centers);
    assert_eq!(a.cost, b.cost);
}

#[test]
fn cost_never_increases_across_update_then_assign() {
    // Soft monotonicity over manually driven phases: 0,1,2 cluster left,
    // 9,10,11 cluster right, so the first update pulls each center to its
    // member mean and the reassignment cost drops from 6 to 4.
    let store =
        VectorStore::from_matrix(array![[0.0], [1.0], [2.0], [9.0], [10.0], [11.0]]).unwrap();
    let mut centers = array![[0.0], [9.0]];

    let first = assign(&store, centers.view());
    assert_eq!(first.labels, vec![0, 0, 0, 1, 1, 1]);
    assert!((first.cost - 6.0).abs() < 1e-12);

    update_centers(&store, &first.labels, &mut centers).unwrap();
    assert_eq!(centers, array![[1.0], [10.0]]);

    let second = assign(&store, centers.view());
    assert!(second.cost <= first.cost);
    assert!((second.cost - 4.0).abs() < 1e-12);
}

#[test]
fn more_clusters_than_vectors_is_a_configuration_error() {
    let store = VectorStore::random(5, 2, 0).unwrap();
    let result = run(&store, &config(&store, 6));
    assert!(matches!(result, Err(KMeansError::Configuration(_))));
}

#[test]
fn four_point_two_cluster_scenario() {
    let store = VectorStore::from_matrix(array![
        [0.0, 0.0],
        [0.0, 1.0],
        [10.0, 0.0],
        [10.0, 1.0],
    ])
    .unwrap();
    let initial = array![[0.0, 0.0], [10.0, 0.0]];
    let output = run_with_centers(&store, initial, &config(&store, 2)).unwrap();
    assert_eq!(output.labels, vec![0, 0, 1, 1]);
    for (got, want) in output
        .centers
        .iter()
        .zip([0.0, 0.5, 10.0, 0.5])
    {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn identical_vectors_with_two_clusters_terminate() {
    let store = VectorStore::from_matrix(array![[5.0, 5.0], [5.0, 5.0], [5.0, 5.0]]).unwrap();
    let cfg = KMeansConfig {
        init: InitPolicy::RandomDistinct,
        ..config(&store, 2)
    };
    let output = run(&store, &cfg).unwrap();
    assert!(output.iterations <= cfg.max_iters);
    assert_eq!(output.cost, 0.0);
    assert!(output.labels.iter().all(|&label| label < 2));
}
