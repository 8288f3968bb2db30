use ndarray::{Array2, Axis};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use crate::distance::squared_euclidean;
use crate::error::{KMeansError, Result};
use crate::store::VectorStore;

/// Center seeding policy. All policies pick k distinct vector indices and
/// are deterministic for a given rng state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPolicy {
    /// Uniform sampling without replacement via partial Fisher-Yates.
    #[default]
    RandomDistinct,
    /// First k vectors whose values differ from every center chosen so far.
    /// Useful when the input contains exact duplicates.
    FirstUniqueByValue,
    /// D^2-weighted sampling (k-means++).
    KMeansPlusPlus,
}

/// Copies k seed rows out of the store according to `policy`.
pub fn seed_centers<R: Rng>(
    store: &VectorStore,
    k: usize,
    policy: InitPolicy,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if k == 0 {
        return Err(KMeansError::Configuration(
            "cluster count must be non-zero".into(),
        ));
    }
    if k > store.len() {
        return Err(KMeansError::Configuration(format!(
            "cannot choose {} distinct centers from {} vectors",
            k,
            store.len()
        )));
    }
    let indices = match policy {
        InitPolicy::RandomDistinct => random_distinct(store.len(), k, rng),
        InitPolicy::FirstUniqueByValue => first_unique_by_value(store, k)?,
        InitPolicy::KMeansPlusPlus => kmeans_plusplus(store, k, rng)?,
    };
    Ok(store.view().select(Axis(0), &indices))
}

fn random_distinct<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let (chosen, _) = indices.partial_shuffle(rng, k);
    chosen.to_vec()
}

fn first_unique_by_value(store: &VectorStore, k: usize) -> Result<Vec<usize>> {
    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    for index in 0..store.len() {
        if chosen.len() == k {
            break;
        }
        let candidate = store.row(index);
        if chosen.iter().all(|&c| store.row(c) != candidate) {
            chosen.push(index);
        }
    }
    if chosen.len() < k {
        return Err(KMeansError::Configuration(format!(
            "input holds only {} distinct vector values, {} centers requested",
            chosen.len(),
            k
        )));
    }
    Ok(chosen)
}

fn kmeans_plusplus<R: Rng>(store: &VectorStore, k: usize, rng: &mut R) -> Result<Vec<usize>> {
    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    chosen.push(rng.gen_range(0..store.len()));

    let mut min_distances = vec![f64::MAX; store.len()];
    for _ in 1..k {
        let last = store.row(*chosen.last().expect("at least one seed"));
        min_distances
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, min_dist)| {
                let distance = squared_euclidean(store.row(index), last);
                *min_dist = min_dist.min(distance);
            });

        // Chosen indices carry weight zero, so sampling never repeats one.
        // A zero weight sum means every remaining vector duplicates a
        // chosen center; fall back to the first unchosen index.
        let next = match WeightedIndex::new(&min_distances) {
            Ok(weighted) => weighted.sample(rng),
            Err(_) => (0..store.len())
                .find(|index| !chosen.contains(index))
                .ok_or_else(|| {
                    KMeansError::Configuration(
                        "no unchosen vector left for k-means++ seeding".into(),
                    )
                })?,
        };
        chosen.push(next);
    }
    Ok(chosen)
}
