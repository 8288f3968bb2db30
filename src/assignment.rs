use ndarray::ArrayView2;
use rayon::prelude::*;

use crate::distance::squared_euclidean;
use crate::store::VectorStore;

/// Labels plus the total cost of one assignment pass.
///
/// Cost is the sum of per-vector minimum Euclidean distances (the square
/// root of the winning squared distance), the convergence signal of the
/// outer loop.
#[derive(Debug, Clone)]
pub struct AssignOutcome {
    pub labels: Vec<usize>,
    pub cost: f64,
}

/// Assigns every vector to its nearest center by squared Euclidean distance.
///
/// Ties break toward the lowest center index: the running minimum is only
/// replaced on a strictly smaller distance. Rows are independent, so the
/// pass fans out across rayon workers; each worker writes only its own
/// output slots and the per-vector distances are summed once at the end,
/// keeping the result deterministic.
pub fn assign(store: &VectorStore, centers: ArrayView2<'_, f64>) -> AssignOutcome {
    let (labels, distances): (Vec<usize>, Vec<f64>) = (0..store.len())
        .into_par_iter()
        .map(|index| {
            let vector = store.row(index);
            let mut best_center = 0usize;
            let mut min_distance = f64::INFINITY;
            for (center_index, center) in centers.outer_iter().enumerate() {
                let distance = squared_euclidean(vector, center);
                if distance < min_distance {
                    min_distance = distance;
                    best_center = center_index;
                }
            }
            (best_center, min_distance.sqrt())
        })
        .unzip();

    let cost: f64 = distances.iter().sum();
    if !cost.is_finite() {
        log::warn!("assignment cost is non-finite ({}), input scale suspect", cost);
    }
    AssignOutcome { labels, cost }
}
