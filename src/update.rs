use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::{KMeansError, Result};
use crate::store::VectorStore;

/// Per-center sums and member counts for one pass over the labels.
///
/// Accumulation is partitioned: each rayon worker folds its share of the
/// vectors into a private (sums, counts) buffer and the buffers are merged
/// in a final reduction, so the hot loop takes no locks and the result does
/// not depend on worker scheduling.
fn accumulate(
    store: &VectorStore,
    labels: &[usize],
    k: usize,
) -> (Array2<f64>, Vec<usize>) {
    let d = store.dim();
    (0..store.len())
        .into_par_iter()
        .fold(
            || (Array2::<f64>::zeros((k, d)), vec![0usize; k]),
            |(mut sums, mut counts), index| {
                let label = labels[index];
                sums.row_mut(label)
                    .zip_mut_with(&store.row(index), |sum, &value| *sum += value);
                counts[label] += 1;
                (sums, counts)
            },
        )
        .reduce(
            || (Array2::<f64>::zeros((k, d)), vec![0usize; k]),
            |(mut sums_a, mut counts_a), (sums_b, counts_b)| {
                sums_a += &sums_b;
                for (a, b) in counts_a.iter_mut().zip(counts_b) {
                    *a += b;
                }
                (sums_a, counts_a)
            },
        )
}

fn find_substitute(store: &VectorStore, centers: ArrayView2<'_, f64>) -> Option<usize> {
    (0..store.len()).find(|&index| {
        let candidate = store.row(index);
        centers.outer_iter().all(|center| center != candidate)
    })
}

/// Recomputes every center as the mean of its assigned vectors.
///
/// An empty center is substituted with a vector not equal to any current
/// center, so it earns members on the next assignment pass instead of
/// staying stuck forever. At most k centers can be empty, so the
/// substitution loop is bounded. When no substitute exists the center is
/// left where it was; that is fatal only for k == n, where every vector
/// already serves as a center.
///
/// Returns the number of substitutions performed.
pub fn update_centers(
    store: &VectorStore,
    labels: &[usize],
    centers: &mut Array2<f64>,
) -> Result<usize> {
    let k = centers.nrows();
    let (sums, counts) = accumulate(store, labels, k);

    for center_index in 0..k {
        if counts[center_index] > 0 {
            let mean = sums
                .row(center_index)
                .map(|&sum| sum / counts[center_index] as f64);
            centers.row_mut(center_index).assign(&mean);
        }
    }

    let empty_centers: Vec<usize> = (0..k).filter(|&c| counts[c] == 0).collect();
    let mut substitutions = 0;
    for center_index in empty_centers {
        match find_substitute(store, centers.view()) {
            Some(vector_index) => {
                log::warn!(
                    "center {} has no members, substituting vector {}",
                    center_index,
                    vector_index
                );
                centers
                    .row_mut(center_index)
                    .assign(&store.row(vector_index));
                substitutions += 1;
            }
            None if store.len() == k => {
                return Err(KMeansError::DegenerateCluster {
                    center: center_index,
                });
            }
            None => {
                // Every vector value already appears among the centers
                // (duplicate-heavy input); the center stays put and the
                // pass count stays stable.
                log::warn!(
                    "center {} has no members and no unused vector value exists, leaving it unchanged",
                    center_index
                );
            }
        }
    }
    Ok(substitutions)
}
