use ndarray::ArrayView1;

/// Squared L2 distance between two equal-length vectors.
///
/// Kept squared for center comparison; the square root is taken only once
/// per vector when the winning distance enters the total cost.
pub fn squared_euclidean(us: ArrayView1<'_, f64>, them: ArrayView1<'_, f64>) -> f64 {
    us.iter()
        .zip(them.iter())
        .map(|(a, b)| {
            let diff = a - b;
            diff * diff
        })
        .sum()
}

pub fn euclidean(us: ArrayView1<'_, f64>, them: ArrayView1<'_, f64>) -> f64 {
    squared_euclidean(us, them).sqrt()
}
