//! Train/test and validation partitioning

use ndarray::{Array2, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of a seeded train/test split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` with `seed` and hold out `ceil(n_rows * test_fraction)`
/// rows for testing
///
/// Unstratified: class proportions in each side follow whatever the shuffle
/// produces.
pub fn train_test_split(n_rows: usize, test_fraction: f32, seed: u64) -> SplitIndices {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    // f32 product so that e.g. 10 * 0.2 is exactly 2 rather than 2.0000000298
    let n_test = ((n_rows as f32) * test_fraction).ceil() as usize;
    let n_test = n_test.min(n_rows);
    let train = indices.split_off(n_test);
    SplitIndices { train, test: indices }
}

/// Number of leading rows kept for fitting when the tail
/// `validation_fraction` of `n_rows` is held out for validation
pub fn validation_split(n_rows: usize, validation_fraction: f32) -> usize {
    let keep = ((n_rows as f32) * (1.0 - validation_fraction)).floor() as usize;
    keep.min(n_rows)
}

/// Scaled features with their one-hot targets and class codes
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// rows × features, standardized
    pub features: Array2<f32>,
    /// rows × classes, one-hot
    pub targets: Array2<f32>,
    /// Class code per row
    pub codes: Vec<usize>,
}

impl Partition {
    /// Gather `rows` out of full matrices
    pub fn select(
        features: ArrayView2<'_, f32>,
        targets: ArrayView2<'_, f32>,
        codes: &[usize],
        rows: &[usize],
    ) -> Self {
        Self {
            features: features.select(Axis(0), rows),
            targets: targets.select(Axis(0), rows),
            codes: rows.iter().map(|&r| codes[r]).collect(),
        }
    }

    /// Split at `mid`: `[0, mid)` and `[mid, len)`
    pub fn split_at(&self, mid: usize) -> (Self, Self) {
        let mid = mid.min(self.len());
        let head: Vec<usize> = (0..mid).collect();
        let tail: Vec<usize> = (mid..self.len()).collect();
        (
            Self::select(self.features.view(), self.targets.view(), &self.codes, &head),
            Self::select(self.features.view(), self.targets.view(), &self.codes, &tail),
        )
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the partition has no rows
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes_80_20() {
        let split = train_test_split(1014, 0.2, 42);
        assert_eq!(split.test.len(), 203);
        assert_eq!(split.train.len(), 811);
    }

    #[test]
    fn test_split_small_exact_fraction() {
        let split = train_test_split(10, 0.2, 42);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn test_split_is_seeded() {
        assert_eq!(train_test_split(50, 0.2, 42), train_test_split(50, 0.2, 42));
        assert_ne!(train_test_split(50, 0.2, 42), train_test_split(50, 0.2, 7));
    }

    #[test]
    fn test_validation_split_keras_semantics() {
        assert_eq!(validation_split(811, 0.2), 648);
        assert_eq!(validation_split(10, 0.2), 8);
        assert_eq!(validation_split(10, 0.0), 10);
        assert_eq!(validation_split(0, 0.2), 0);
    }

    #[test]
    fn test_partition_select_and_split() {
        let features = array![[0.0f32], [1.0], [2.0], [3.0]];
        let targets = array![[1.0f32, 0.0], [0.0, 1.0], [1.0, 0.0], [0.0, 1.0]];
        let codes = [0, 1, 0, 1];

        let part = Partition::select(features.view(), targets.view(), &codes, &[3, 1, 0]);
        assert_eq!(part.len(), 3);
        assert_eq!(part.features.column(0).to_vec(), vec![3.0, 1.0, 0.0]);
        assert_eq!(part.codes, vec![1, 1, 0]);

        let (head, tail) = part.split_at(2);
        assert_eq!(head.codes, vec![1, 1]);
        assert_eq!(tail.codes, vec![0]);
        assert_eq!(tail.targets.row(0).to_vec(), vec![1.0, 0.0]);
    }

    proptest! {
        #[test]
        fn prop_split_partitions_rows(n in 1usize..2000, frac in 0.05f32..0.95, seed in any::<u64>()) {
            let split = train_test_split(n, frac, seed);
            prop_assert_eq!(split.train.len() + split.test.len(), n);

            let train: HashSet<_> = split.train.iter().collect();
            let test: HashSet<_> = split.test.iter().collect();
            prop_assert!(train.is_disjoint(&test));
            prop_assert_eq!(train.len() + test.len(), n);

            let expected = (n as f64) * f64::from(frac);
            prop_assert!((split.test.len() as f64 - expected).abs() < 1.0 + 1e-6);
        }
    }
}
