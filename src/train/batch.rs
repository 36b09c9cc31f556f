//! Mini-batch assembly

use ndarray::{Array2, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

/// One mini-batch of scaled features and one-hot targets
#[derive(Debug, Clone)]
pub struct Batch {
    pub inputs: Array2<f32>,
    pub targets: Array2<f32>,
}

impl Batch {
    /// Gather the given rows
    pub fn gather(features: ArrayView2<'_, f32>, targets: ArrayView2<'_, f32>, rows: &[usize]) -> Self {
        Self { inputs: features.select(Axis(0), rows), targets: targets.select(Axis(0), rows) }
    }

    pub fn len(&self) -> usize {
        self.inputs.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row visiting order for one epoch: a fresh permutation when `shuffle` is
/// set, otherwise `0..n`
pub fn batch_order<R: Rng>(n: usize, shuffle: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if shuffle {
        order.shuffle(rng);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gather_rows() {
        let x = array![[1.0f32, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let y = array![[1.0f32, 0.0], [0.0, 1.0], [1.0, 0.0]];
        let batch = Batch::gather(x.view(), y.view(), &[2, 0]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.inputs, array![[3.0, 3.0], [1.0, 1.0]]);
        assert_eq!(batch.targets, array![[1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_batch_order_without_shuffle() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(batch_order(4, false, &mut rng), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_batch_order_is_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut order = batch_order(50, true, &mut rng);
        order.sort_unstable();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }
}
