use ndarray::{Array2, ArrayView1, ArrayView2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{KMeansError, Result};

/// Read-only store of the N input vectors, one per row of an N×D matrix.
///
/// Construction either fills the matrix with uniform random values in [0, 1)
/// from a seed, or adopts a matrix produced by an external loader. There is
/// no mutation after construction, so the store is shared freely across
/// rayon workers without locking.
pub struct VectorStore {
    data: Array2<f64>,
}

impl VectorStore {
    /// Generates `n` random vectors of dimension `d`, deterministic per seed.
    pub fn random(n: usize, d: usize, seed: u64) -> Result<Self> {
        Self::check_shape(n, d)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let data = Array2::random_using((n, d), Uniform::new(0.0, 1.0), &mut rng);
        Ok(Self { data })
    }

    /// Adopts a matrix from an external loader.
    ///
    /// The loader contract is an N×D matrix of finite reals; a non-finite
    /// entry is rejected here rather than surfacing later as a NaN cost.
    pub fn from_matrix(data: Array2<f64>) -> Result<Self> {
        Self::check_shape(data.nrows(), data.ncols())?;
        if let Some(((row, col), value)) =
            data.indexed_iter().find(|(_, value)| !value.is_finite())
        {
            return Err(KMeansError::Configuration(format!(
                "non-finite value {} at row {}, column {}",
                value, row, col
            )));
        }
        Ok(Self { data })
    }

    fn check_shape(n: usize, d: usize) -> Result<()> {
        if n == 0 || d == 0 {
            return Err(KMeansError::Configuration(
                "vector store must have non-zero rows and columns".into(),
            ));
        }
        let elements = n.checked_mul(d).ok_or_else(|| {
            KMeansError::Configuration(format!("{}x{} matrix overflows addressable size", n, d))
        })?;
        elements.checked_mul(std::mem::size_of::<f64>()).ok_or_else(|| {
            KMeansError::Configuration(format!("{}x{} matrix overflows addressable size", n, d))
        })?;
        Ok(())
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Dimension of every vector.
    pub fn dim(&self) -> usize {
        self.data.ncols()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.row(index)
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}
